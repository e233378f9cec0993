//! Account commands: login, register, logout, whoami.

use bazaar_core::Role;
use bazaar_storefront::state::AppState;
use bazaar_storefront::views::{LoginView, Navbar, RegisterView};

use super::{CommandError, command_for, password, print_notice};

/// Log in and report where the user lands.
pub async fn login(
    state: &AppState,
    email: String,
    given_password: Option<String>,
) -> Result<(), CommandError> {
    let mut view = LoginView::new();
    view.email = email;
    view.password = password(given_password)?;

    match view.submit(&state.auth).await {
        Some(route) => {
            let who = state
                .sessions
                .current_user()
                .map_or_else(String::new, |u| format!(" as {} ({})", u.name, u.role));
            println!("Logged in{who}. Home page: {route}");
            Ok(())
        }
        None => Err(CommandError::Rejected(
            view.error().unwrap_or_default().to_owned(),
        )),
    }
}

/// Create an account.
pub async fn register(
    state: &AppState,
    name: String,
    email: String,
    given_password: Option<String>,
    role: Role,
) -> Result<(), CommandError> {
    let mut view = RegisterView::new();
    view.name = name;
    view.email = email;
    view.password = password(given_password)?;
    view.role = role;

    let route = view.submit(&state.auth).await;
    print_notice(view.notice())?;
    if let Some(route) = route {
        println!("Next: {route}");
    }
    Ok(())
}

pub fn logout(state: &AppState) {
    let mut navbar = Navbar::new(state);
    let route = navbar.logout(state);
    println!("Logged out. Next: {route}");
}

/// Print the logged-in user and the cart badge.
pub fn whoami(state: &AppState) {
    let navbar = Navbar::new(state);
    match navbar.user() {
        Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
        None => println!("Not logged in"),
    }
    println!("Cart: {} item(s)", navbar.cart_count());

    let pages: Vec<&str> = navbar.links().into_iter().map(command_for).collect();
    println!("Pages: {}", pages.join(", "));
}
