//! Seller notification for newly submitted orders.
//!
//! Notifications are best-effort: callers log a failed notification and carry
//! on, the persisted order is never rolled back.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::domain::order::Order;
use crate::domain::types::ContactKind;
use crate::models::config::{EmailConfig, OperatorConfig};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("email provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("email template failed: {0}")]
    Template(#[from] tera::Error),
}

const ORDER_EMAIL_TEMPLATE: &str = "order_email.html";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that tells the seller about a new order.
pub trait OrderNotifier {
    fn notify(&self, order: &Order) -> impl Future<Output = Result<(), NotifyError>>;
}

/// Request body of the transactional email API (Resend-compatible).
#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: String,
    html: String,
}

/// Logs every order and emails it to the operator when an API key is configured.
pub struct EmailNotifier {
    client: reqwest::Client,
    templates: Tera,
    api_key: Option<String>,
    api_url: String,
    from: String,
    to: String,
}

impl EmailNotifier {
    pub fn new(email: &EmailConfig, operator: &OperatorConfig) -> Result<Self, NotifyError> {
        let api_key = email.api_key.clone().filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            log::warn!("Email API key not configured, order emails are disabled");
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            templates: email_templates()?,
            api_key,
            api_url: email.api_url.clone(),
            from: email.from.clone(),
            to: operator.email.clone(),
        })
    }
}

impl OrderNotifier for EmailNotifier {
    async fn notify(&self, order: &Order) -> Result<(), NotifyError> {
        log::info!("New order received\n{}", order_summary(order));

        let Some(api_key) = &self.api_key else {
            return Ok(());
        };

        let request = EmailRequest {
            from: &self.from,
            to: vec![&self.to],
            subject: order_subject(order),
            html: order_email_html(&self.templates, order)?,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        log::info!("Order email for {} sent to {}", order.id, self.to);
        Ok(())
    }
}

fn plural_toys(count: usize) -> &'static str {
    if count == 1 { "toy" } else { "toys" }
}

fn colors_of(line: &crate::domain::order::OrderLine) -> String {
    line.colors
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Email subject, e.g. `New Order: 2 toys ($12)`.
pub fn order_subject(order: &Order) -> String {
    format!(
        "New Order: {} {} (${})",
        order.items.len(),
        plural_toys(order.items.len()),
        order.total
    )
}

/// Plain-text summary written to the log for every order.
pub fn order_summary(order: &Order) -> String {
    let mut lines = vec![
        format!("Order ID: {}", order.id),
        format!("Customer: {}", order.buyer_name),
        format!("Contact: {}", order.buyer_contact),
        format!("Total: ${}", order.total),
        "Items:".to_string(),
    ];
    for (i, line) in order.items.iter().enumerate() {
        lines.push(format!("  {}. {} ({})", i + 1, line.toy_name, colors_of(line)));
    }
    if let Some(notes) = &order.notes {
        lines.push(format!("Notes: {notes}"));
    }
    lines.push(format!("Time: {}", format_timestamp(order)));
    lines.join("\n")
}

fn format_timestamp(order: &Order) -> String {
    order
        .created_at
        .format("%A, %B %-d, %-I:%M %p UTC")
        .to_string()
}

/// Link that opens a conversation with the buyer: `mailto:` or `tel:`.
pub fn contact_href(order: &Order) -> String {
    match order.buyer_contact.kind() {
        ContactKind::Email => format!("mailto:{}", order.buyer_contact),
        ContactKind::Phone => format!("tel:{}", order.buyer_contact),
    }
}

/// Reply affordance: an email with a prefilled subject, or an SMS.
pub fn reply_href(order: &Order) -> String {
    match order.buyer_contact.kind() {
        ContactKind::Email => format!(
            "mailto:{}?subject=Your%20Rainbow%20Toys%20Order",
            order.buyer_contact
        ),
        ContactKind::Phone => format!("sms:{}", order.buyer_contact),
    }
}

/// Templates used for operator emails. The `.html` name turns on autoescaping.
pub fn email_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        ORDER_EMAIL_TEMPLATE,
        include_str!("../templates/order_email.html"),
    )?;
    Ok(tera)
}

#[derive(Serialize)]
struct EmailLine<'a> {
    toy_name: &'a str,
    colors: String,
}

/// HTML body of the operator email.
pub fn order_email_html(tera: &Tera, order: &Order) -> Result<String, tera::Error> {
    let items: Vec<EmailLine> = order
        .items
        .iter()
        .map(|line| EmailLine {
            toy_name: line.toy_name.as_str(),
            colors: colors_of(line),
        })
        .collect();

    let mut context = Context::new();
    context.insert("total", &order.total.to_string());
    context.insert("count", &order.items.len());
    context.insert("toys", plural_toys(order.items.len()));
    context.insert("items", &items);
    context.insert("notes", &order.notes);
    context.insert("buyer", order.buyer_name.as_str());
    context.insert("contact", order.buyer_contact.as_str());
    context.insert("contact_href", &contact_href(order));
    context.insert("reply_href", &reply_href(order));
    context.insert("timestamp", &format_timestamp(order));

    tera.render(ORDER_EMAIL_TEMPLATE, &context)
}
