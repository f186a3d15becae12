use colored::Colorize;
use pillcare_application::SessionUseCase;
use pillcare_core::Result;
use pillcare_core::session::UserProfile;

pub async fn login(usecase: &SessionUseCase, email: &str, password: &str) -> Result<()> {
    let response = usecase.login(email, password).await?;
    println!(
        "{}",
        format!("Logged in as {}", response.user.display_name()).green()
    );
    Ok(())
}

pub fn logout(usecase: &SessionUseCase) {
    usecase.logout();
    println!("Logged out");
}

pub async fn whoami(usecase: &SessionUseCase) -> Result<()> {
    match usecase.restore().await? {
        Some(user) => print_user(&user),
        None => println!("{}", "Not logged in".yellow()),
    }
    Ok(())
}

fn print_user(user: &UserProfile) {
    println!("{} <{}>", user.display_name(), user.email);
    if let Some(role) = &user.role {
        println!("  role: {}", role);
    }
}
