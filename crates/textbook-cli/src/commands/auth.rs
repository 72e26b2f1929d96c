use anyhow::{Context, Result};
use textbook_core::auth::{AuthFlow, BackgroundAnswers, Credentials};
use textbook_core::profile::{
    ExperienceLevel, HardwareBackground, Interest, Profile, ProgrammingLanguage,
    SoftwareBackground,
};
use textbook_core::session::{SessionListener, SessionView, logout as clear_session};

use crate::context::AppContext;

/// Sign-up form as collected from the command line.
pub struct SignupArgs {
    pub name: String,
    pub email: String,
    pub password: String,
    pub level: ExperienceLevel,
    pub software: Option<SoftwareBackground>,
    pub hardware: Option<HardwareBackground>,
    pub languages: Vec<ProgrammingLanguage>,
    pub interests: Vec<Interest>,
}

pub fn signup(ctx: &AppContext, args: SignupArgs) -> Result<()> {
    let mut view = SessionView::from_store(&ctx.store);
    let mut listener = ctx.notifier.subscribe();
    let mut flow = AuthFlow::new(ctx.store.clone(), ctx.notifier.clone());

    flow.create_account()?;
    flow.submit_credentials(Credentials::new(args.name, args.email, args.password))?;

    let answers: &mut BackgroundAnswers = flow.answers_mut();
    answers.experience_level = args.level;
    answers.software_background = args.software;
    answers.hardware_background = args.hardware;
    for language in args.languages {
        answers.programming_languages.insert(language);
    }
    for interest in args.interests {
        answers.interests.insert(interest);
    }

    let completion = flow.complete()?;
    report_session(&mut view, &mut listener);
    print_profile(&completion.profile);
    Ok(())
}

pub fn signin(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let mut view = SessionView::from_store(&ctx.store);
    let mut listener = ctx.notifier.subscribe();
    let mut flow = AuthFlow::new(ctx.store.clone(), ctx.notifier.clone());
    flow.sign_in(email, password)?;
    report_session(&mut view, &mut listener);
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    let mut view = SessionView::from_store(&ctx.store);
    let mut listener = ctx.notifier.subscribe();
    clear_session(&ctx.store, &ctx.notifier).context("Failed to clear stored profile")?;
    report_session(&mut view, &mut listener);
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    let view = SessionView::from_store(&ctx.store);
    match view.profile() {
        Some(profile) => print_profile(profile),
        None => println!("{}", view.label()),
    }
    Ok(())
}

/// Feeds the announced events to `view`, the way a navbar mounted before
/// the action would see them, and prints its label.
fn report_session(view: &mut SessionView, listener: &mut SessionListener) {
    while let Some(event) = listener.try_recv() {
        tracing::debug!("Session event: {}", event.name());
        view.apply(&event);
    }
    println!("{}", view.label());
}

fn print_profile(profile: &Profile) {
    let join = |items: Vec<String>| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    };

    println!("Name:        {}", profile.name);
    println!("Email:       {}", profile.email);
    println!("Level:       {}", profile.experience_level);
    println!(
        "Software:    {}",
        profile
            .software_background
            .map(|b| b.label())
            .unwrap_or("-")
    );
    println!(
        "Hardware:    {}",
        profile
            .hardware_background
            .map(|b| b.label())
            .unwrap_or("-")
    );
    println!(
        "Languages:   {}",
        join(profile.programming_languages.iter().map(|l| l.to_string()).collect())
    );
    println!(
        "Interests:   {}",
        join(profile.interests.iter().map(|i| i.to_string()).collect())
    );
}
