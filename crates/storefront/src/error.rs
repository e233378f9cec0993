//! Error reporting with Sentry integration.
//!
//! Views call [`report`] whenever they turn an [`ApiError`] into a message
//! for the user. Faults outside the user's control are captured to Sentry;
//! everything else is only logged. All helpers are no-ops when Sentry was
//! never initialized.

use crate::api::ApiError;

/// Log an error surfaced to the user and capture it to Sentry if it is a
/// server-side fault.
pub fn report(context: &str, error: &ApiError) {
    if error.is_server_side() {
        let event_id = sentry::capture_error(error);
        tracing::error!(
            error = %error,
            sentry_event_id = %event_id,
            "{context} failed"
        );
    } else {
        tracing::info!(error = %error, "{context} rejected");
    }
}

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user
/// actions leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "12")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_are_noops_without_sentry() {
        set_sentry_user(&7, Some("buyer@shop.test"));
        add_breadcrumb("cart", "Added item", Some(&[("product_id", "1")]));
        report("Checkout", &ApiError::NotLoggedIn);
        report(
            "Checkout",
            &ApiError::Server {
                status: reqwest::StatusCode::BAD_GATEWAY,
                message: "down".to_owned(),
            },
        );
        clear_sentry_user();
    }
}
