use crate::infra::load_roster;
use clap::Args;
use foundyou::config::{AppConfig, MarketplaceConfig};
use foundyou::error::AppError;
use foundyou::marketplace::forms::{
    AuthFailure, AuthService, EngineerDraft, FieldErrors, FormError, FormFlow, OnboardingWizard,
    ProfileDraft, Role, SignupDraft, SimulatedAuthenticator, Submission,
};
use foundyou::marketplace::search::views::cards;
use foundyou::marketplace::search::{
    canonical_skill, CriteriaError, DataSourceError, FilterCriteria, FixtureDataSource,
    ListingMode, ListingSnapshot, ProfileView, RateRange, SearchSession, SimulatedLatency,
    TalentDataSource, TalentDirectory,
};
use foundyou::marketplace::site::HomeContent;
use foundyou::marketplace::talent::{Availability, Star, TalentId};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Free text matched against name, title, and skills
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    /// Required skill; repeat the flag for several
    #[arg(long = "skill")]
    pub(crate) skills: Vec<String>,
    /// Lower bound of the hourly rate slider
    #[arg(long, default_value_t = RateRange::DEFAULT_LOW)]
    pub(crate) min_rate: u32,
    /// Upper bound of the hourly rate slider
    #[arg(long, default_value_t = RateRange::DEFAULT_HIGH)]
    pub(crate) max_rate: u32,
    /// Availability label, e.g. "Within 1 week"
    #[arg(long, value_parser = crate::infra::parse_availability)]
    pub(crate) availability: Option<Availability>,
    /// Only list verified engineers
    #[arg(long)]
    pub(crate) verified_only: bool,
    /// Result page to show
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,
    /// Apply the criteria instead of listing the full roster
    #[arg(long)]
    pub(crate) filtered: bool,
    /// CSV roster to search instead of the built-in engineers
    #[arg(long)]
    pub(crate) talent_csv: Option<PathBuf>,
    /// Skip the simulated network delay
    #[arg(long)]
    pub(crate) no_delay: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ProfileArgs {
    /// Engineer id as shown on the listing
    pub(crate) id: String,
    /// CSV roster to read instead of the built-in engineers
    #[arg(long)]
    pub(crate) talent_csv: Option<PathBuf>,
    /// Skip the simulated network delay
    #[arg(long)]
    pub(crate) no_delay: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the simulated network delays
    #[arg(long)]
    pub(crate) no_delay: bool,
    /// Apply search criteria instead of listing the full roster
    #[arg(long)]
    pub(crate) filtered: bool,
    /// Skip the signup and onboarding portion of the demo
    #[arg(long)]
    pub(crate) skip_forms: bool,
}

fn marketplace_config(no_delay: bool, filtered: bool) -> Result<MarketplaceConfig, AppError> {
    let mut config = AppConfig::load()?.marketplace;
    if no_delay {
        config.latency = SimulatedLatency::none();
    }
    if filtered {
        config.listing_mode = ListingMode::Filtered;
    }
    Ok(config)
}

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let config = marketplace_config(args.no_delay, args.filtered)?;
    let roster = load_roster(args.talent_csv.as_deref(), &config)?;
    let source = Arc::new(FixtureDataSource::from_config(roster, &config));

    let mut session = SearchSession::open(source, config.total_pages);
    session.settle().await;

    let filter = session.filter_mut();
    filter.set_query(args.query.as_str());
    for skill in &args.skills {
        if canonical_skill(skill).is_none() {
            let err = DataSourceError::from(CriteriaError::UnknownSkill(skill.clone()));
            return Err(err.into());
        }
        filter.add_skill(skill);
    }
    filter.set_rate_range(args.min_rate, args.max_rate);
    filter.set_availability(args.availability);
    filter.set_verified_only(args.verified_only);

    let started = Instant::now();
    let criteria = session.submit_search();
    session.settle().await;

    if args.page > 1 && !session.go_to(args.page) {
        println!(
            "Page {} is outside 1-{}; staying on page {}",
            args.page,
            session.pagination().total(),
            session.pagination().current()
        );
    }
    let snapshot = session.settle().await;

    render_search_header(&criteria, config.listing_mode);
    render_listing(&snapshot, started.elapsed());
    Ok(())
}

pub(crate) async fn run_profile(args: ProfileArgs) -> Result<(), AppError> {
    let config = marketplace_config(args.no_delay, false)?;
    let roster = load_roster(args.talent_csv.as_deref(), &config)?;
    let directory = TalentDirectory::new(Arc::new(FixtureDataSource::from_config(roster, &config)));

    match directory.profile(&TalentId::new(args.id.as_str())).await? {
        Some(profile) => render_profile(&profile),
        None => {
            println!("Engineer Not Found");
            println!("The engineer profile you're looking for doesn't exist or has been removed.");
        }
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = marketplace_config(args.no_delay, args.filtered)?;

    render_home(&HomeContent::standard());

    let roster = load_roster(None, &config)?;
    let source = Arc::new(FixtureDataSource::from_config(roster, &config));
    demo_search(Arc::clone(&source), &config).await;

    println!("\n=== Engineer Profile ===");
    let directory = TalentDirectory::new(source);
    match directory.profile(&TalentId::new("1")).await? {
        Some(profile) => render_profile(&profile),
        None => println!("  Featured engineer missing from roster"),
    }

    if args.skip_forms {
        return Ok(());
    }

    demo_signup().await;
    demo_onboarding();
    Ok(())
}

async fn demo_search<S>(source: Arc<S>, config: &MarketplaceConfig)
where
    S: TalentDataSource + 'static,
{
    println!("\n=== Talent Search ===");
    let mut session = SearchSession::open(source, config.total_pages);
    println!(
        "  Initial load started (loading={}, pending={})",
        session.is_loading(),
        session.pending_refreshes()
    );
    session.settle().await;

    let filter = session.filter_mut();
    filter.add_skill("React");
    filter.add_skill("Node.js");
    filter.set_rate_range(40, 120);
    filter.set_verified_only(true);

    let started = Instant::now();
    let criteria = session.submit_search();
    println!("  Search submitted (loading={})", session.is_loading());
    let snapshot = session.settle().await;

    render_search_header(&criteria, config.listing_mode);
    render_listing(&snapshot, started.elapsed());

    let last = session.pagination().total();
    if session.go_to(last) {
        let snapshot = session.settle().await;
        println!(
            "  Jumped to page {} of {} ({} records)",
            snapshot.page,
            snapshot.total_pages,
            snapshot.records.len()
        );
    }
    if !session.go_to(last + 1) {
        println!("  Page {} is past the end; pager unchanged", last + 1);
    }
}

async fn demo_signup() {
    println!("\n=== Account Signup ===");
    let auth = AuthService::new(Arc::new(SimulatedAuthenticator));
    let mut flow = FormFlow::new();

    let mut draft = SignupDraft {
        name: "Jordan Lee".to_string(),
        email: "jordan@example.com".to_string(),
        password: "s3cure-pass".to_string(),
        confirm_password: "s3cure-pas".to_string(),
        role: Role::Work,
    };

    match auth.signup(&mut flow, &draft).await {
        Err(AuthFailure::Form(FormError::Invalid(errors))) => {
            println!("  First attempt rejected ({:?})", flow.state());
            render_errors(&errors);
        }
        Err(other) => println!("  Signup failed: {}", other),
        Ok(_) => println!("  Unexpectedly accepted a mismatched confirmation"),
    }

    flow.edit();
    draft.confirm_password = draft.password.clone();
    match auth.signup(&mut flow, &draft).await {
        Ok(submission) => render_submission(&submission),
        Err(err) => println!("  Signup failed: {}", err),
    }
}

fn demo_onboarding() {
    println!("\n=== Engineer Onboarding ===");
    let mut wizard = OnboardingWizard::new(Role::Work);
    let mut draft = EngineerDraft {
        title: "Dev".to_string(),
        expertise: "frontend".to_string(),
        bio: "short".to_string(),
        skills: "React, TypeScript, react".to_string(),
        hourly_rate: "85".to_string(),
        experience_level: "mid".to_string(),
    };

    match wizard.submit(&ProfileDraft::Engineer(draft.clone())) {
        Err(FormError::Invalid(errors)) => {
            println!("  First attempt rejected ({:?})", wizard.state());
            render_errors(&errors);
        }
        Err(other) => println!("  Onboarding failed: {}", other),
        Ok(_) => println!("  Unexpectedly accepted a five character bio"),
    }

    wizard.edit();
    draft.bio = "Experienced frontend engineer.".to_string();
    match wizard.submit(&ProfileDraft::Engineer(draft)) {
        Ok(submission) => render_submission(&submission),
        Err(err) => println!("  Onboarding failed: {}", err),
    }
}

fn render_home(home: &HomeContent) {
    println!("=== FoundYou ===");
    println!("{}", home.headline);
    println!("{}", home.tagline);
    for cta in &home.calls_to_action {
        println!("  [{}] -> {}", cta.label, cta.target);
    }
    println!("Features:");
    for feature in home.features {
        println!("  - {}: {}", feature.title, feature.description);
    }
}

fn render_search_header(criteria: &FilterCriteria, mode: ListingMode) {
    let skills: Vec<&str> = criteria.skills.iter().collect();
    let availability = criteria
        .availability
        .map(Availability::label)
        .unwrap_or("any");
    println!(
        "  Criteria: query=\"{}\" skills=[{}] rate=${}-${}/hr availability={} verified_only={}",
        criteria.query,
        skills.join(", "),
        criteria.rate_range.low(),
        criteria.rate_range.high(),
        availability,
        criteria.verified_only
    );
    match mode {
        ListingMode::Passthrough => {
            println!("  Mode: passthrough (criteria are recorded but not applied)")
        }
        ListingMode::Filtered => println!("  Mode: filtered"),
    }
}

fn render_listing(snapshot: &ListingSnapshot, elapsed: Duration) {
    println!(
        "  Page {} of {} ({} of {} records, loaded in {} ms)",
        snapshot.page,
        snapshot.total_pages,
        snapshot.records.len(),
        snapshot.total_matches,
        elapsed.as_millis()
    );
    if let Some(error) = &snapshot.last_error {
        println!("  Last refresh failed: {}", error);
    }
    if snapshot.records.is_empty() {
        println!("  No engineers match these filters.");
        return;
    }

    for card in cards(&snapshot.records) {
        let badge = if card.featured { "[Top Match] " } else { "" };
        let verified = if card.verified { " verified" } else { "" };
        println!(
            "    {}{} - {}  {} {}  {}  {}{}",
            badge,
            card.name,
            card.title,
            star_line(&card.stars),
            card.rating_label,
            card.rate_label,
            card.availability.label(),
            verified
        );
        let overflow = card
            .overflow_label()
            .map(|label| format!(" {label}"))
            .unwrap_or_default();
        println!("      {}{}", card.top_skills.join(", "), overflow);
    }
}

fn render_profile(view: &ProfileView) {
    let profile = &view.profile;
    let record = &profile.record;
    println!("  {} - {}", record.name, record.title);
    println!(
        "  {} {}  {}  {}",
        star_line(&view.stars),
        view.rating_label,
        view.rate_label,
        record.availability.label()
    );
    if !profile.location.is_empty() {
        println!(
            "  {} | {} years experience",
            profile.location, profile.experience_years
        );
    }
    if !profile.bio.is_empty() {
        println!("  {}", profile.bio);
    }
    let skills: Vec<&str> = record.skills.iter().collect();
    println!("  Skills: {}", skills.join(", "));

    if !profile.languages.is_empty() {
        let languages: Vec<String> = profile
            .languages
            .iter()
            .map(|language| format!("{} ({})", language.name, language.level))
            .collect();
        println!("  Languages: {}", languages.join(", "));
    }
    for entry in &profile.work_history {
        println!("  Work: {} at {} ({})", entry.role, entry.company, entry.duration);
    }
    for education in &profile.education {
        println!(
            "  Education: {}, {} ({})",
            education.degree, education.institution, education.year
        );
    }
    for project in &profile.projects {
        println!(
            "  Project: {} [{}]",
            project.name,
            project.technologies.join(", ")
        );
    }
    if let Some(average) = profile.average_review_rating() {
        println!(
            "  Reviews: {} (average {:.1})",
            profile.reviews.len(),
            average
        );
        for review in &profile.reviews {
            println!(
                "    - {} on {}: {:.1} \"{}\"",
                review.name, review.date, review.rating, review.comment
            );
        }
    }
}

fn render_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        println!("    {}: {}", field, message);
    }
}

fn render_submission<T: Serialize>(submission: &Submission<T>) {
    println!(
        "  {}: {}",
        submission.notice.title, submission.notice.description
    );
    println!(
        "  Redirecting to {} in {} ms",
        submission.redirect, submission.redirect_after_ms
    );
    match serde_json::to_string_pretty(&submission.record) {
        Ok(json) => println!("  Record:\n{}", json),
        Err(err) => println!("  Record unavailable: {}", err),
    }
}

fn star_line(stars: &[Star; 5]) -> String {
    stars
        .iter()
        .map(|star| match star {
            Star::Full => '★',
            Star::Half => '⯪',
            Star::Empty => '☆',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundyou::marketplace::talent::star_strip;

    #[test]
    fn star_line_marks_half_stars() {
        assert_eq!(star_line(&star_strip(4.5)), "★★★★⯪");
        assert_eq!(star_line(&star_strip(0.0)), "☆☆☆☆☆");
    }

    #[tokio::test]
    async fn demo_forms_run_without_a_backend() {
        demo_signup().await;
        demo_onboarding();
    }

    #[tokio::test(start_paused = true)]
    async fn demo_search_runs_against_fixtures() {
        let config = MarketplaceConfig::default();
        let source = Arc::new(FixtureDataSource::new(
            foundyou::marketplace::talent::TalentRoster::builtin(),
        ));
        demo_search(source, &config).await;
    }
}
