//! CLI smoke entry point.
//!
//! Loads configuration from the environment (and `.env`, when present), opens
//! the database and walks through the member repository surface, printing
//! each result.

use log::error;
use roster_core::{
    core_version, ping, CrudRepository, Direction, MemberRepository, MemberRepositoryCustom,
    MemberService, PageRequest, RosterConfig, Sort, SqliteMemberRepository, SqliteTeamRepository,
    Team,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("roster: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    println!("roster_core ping={}", ping());
    println!("roster_core version={}", core_version());

    let config = RosterConfig::from_env()?;
    let logging_active = config.init_logging()?;
    println!("logging active={logging_active} level={}", config.log_level);

    let conn = config.open_database()?;
    let teams = SqliteTeamRepository::try_new(&conn)?;
    let members = SqliteMemberRepository::try_default(&conn)?;
    let service = MemberService::new(members, teams);

    let team_a = Team::new("teamA");
    let team_b = Team::new("teamB");
    service.teams().save_all(&[team_a.clone(), team_b.clone()])?;

    service.join("AAA", 10, Some(team_a.id))?;
    service.join("AAA", 20, Some(team_b.id))?;
    let loner = service.join("BBB", 10, None)?;
    service.transfer(loner.id, team_a.id)?;

    let repo = service.members();
    println!("count={}", repo.count()?);

    for member in repo.find_by_username_and_age_greater_than("AAA", 15)? {
        println!("older AAA: {} age={}", member.username, member.age);
    }

    for dto in repo.find_member_dto()? {
        println!("dto: {} team={}", dto.username, dto.team_name);
    }

    println!("custom find-all size={}", repo.find_member_custom()?.len());

    let request = PageRequest::of_sorted(0, 2, Sort::by(Direction::Asc, &["username"]))?;
    let page = repo.find_all_paged(&request)?;
    println!(
        "page {} of {} (total={}, has_next={})",
        page.number() + 1,
        page.total_pages(),
        page.total_elements(),
        page.has_next()
    );

    Ok(())
}
