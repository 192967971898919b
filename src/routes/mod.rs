use actix_web::HttpResponse;
use actix_web::http::header::{self, ContentType};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::{Deserialize, Deserializer, Serialize};
use tera::{Context, Tera};

use crate::auth::CurrentUser;

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod main;
pub mod profile;
pub mod search;

/// A flash message prepared for rendering.
#[derive(Debug, Serialize)]
struct Alert {
    message: String,
    level: &'static str,
}

/// A pager slot resolved to a link; gap markers carry no href.
#[derive(Debug, Serialize)]
pub(crate) struct PagerItem {
    pub number: Option<usize>,
    pub current: bool,
    pub href: Option<String>,
}

fn alert_level(level: Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Template context shared by every page: pending flash messages, the
/// signed-in visitor when there is one, and the active navigation
/// entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&CurrentUser>,
    active_page: &str,
) -> Context {
    let alerts: Vec<Alert> = flash_messages
        .iter()
        .map(|message| Alert {
            message: message.content().to_string(),
            level: alert_level(message.level()),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("active_page", active_page);
    context
}

/// 303 redirect to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header((header::LOCATION, location))
        .finish()
}

/// Renders `template`, answering 500 when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body),
        Err(err) => {
            log::error!("Failed to render template {template}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Deserializes an empty form value to `None`.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_empty()))
}

/// `vnd` template filter. Prices render as "29.990.000₫".
fn format_vnd(
    value: &tera::Value,
    _args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let amount = value
        .as_f64()
        .ok_or_else(|| tera::Error::msg("vnd filter expects a number"))?;
    let whole = amount.round() as i64;

    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if whole < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped.push('₫');

    Ok(tera::Value::String(grouped))
}

/// Registers the filters the templates rely on.
pub fn register_template_filters(tera: &mut Tera) {
    tera.register_filter("vnd", format_vnd);
}
