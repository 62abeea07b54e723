use axum::response::Html;
use tera::Tera;
use tracing::error;

use shared_models::auth::CurrentUser;
use shared_models::error::AppError;

pub use tera::Context;

/// Page templates compiled into the binary. Every page extends `base.html`.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("signup.html", include_str!("../templates/signup.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("doctors.html", include_str!("../templates/doctors.html")),
    ("contact.html", include_str!("../templates/contact.html")),
    ("elder_ai.html", include_str!("../templates/elder_ai.html")),
    ("nutri_ai.html", include_str!("../templates/nutri_ai.html")),
    ("symptom_checker.html", include_str!("../templates/symptom_checker.html")),
    ("appointments.html", include_str!("../templates/appointments.html")),
    ("consult_online.html", include_str!("../templates/consult_online.html")),
    ("dashboard.html", include_str!("../templates/dashboard.html")),
];

/// Builds the template set. Autoescaping is on for every `.html` template.
pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().copied())?;
    Ok(tera)
}

/// Renders `template` with the session user available as `user`.
pub fn render(
    tera: &Tera,
    template: &str,
    user: Option<&CurrentUser>,
    mut context: Context,
) -> Result<Html<String>, AppError> {
    context.insert("user", &user);

    tera.render(template, &context).map(Html).map_err(|e| {
        error!("Rendering {} failed: {:?}", template, e);
        AppError::Internal(format!("Could not render page {}", template))
    })
}

/// Notice shown above auth forms for the `error` query parameter.
pub fn notice(kind: Option<&str>) -> Option<&'static str> {
    match kind {
        Some("exists") => Some("An account with that email already exists."),
        Some("invalid") => Some("Please fill in every field with valid values."),
        Some("credentials") => Some("Invalid email or password."),
        _ => None,
    }
}
