//! Contacts page, sidebar quick contacts and the footer.
//!
//! Pure formatting of `[contacts]`, `[footer]` and the company tagline.

use crate::config::Settings;
use maud::{Markup, html};

const PHONE_PLACEHOLDER: &str = "Phone number will be added";
const EMAIL_PLACEHOLDER: &str = "Email will be added";
const ADDRESS_PLACEHOLDER: &str = "Address will be added";

/// A configured, non-blank value.
fn configured(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `tel:` target: digits and a leading `+` only.
pub fn tel_href(phone: &str) -> String {
    let mut href = String::from("tel:");
    for (i, c) in phone.trim().chars().enumerate() {
        if c.is_ascii_digit() || (i == 0 && c == '+') {
            href.push(c);
        }
    }
    href
}

fn contact_item(icon: &str, label: &str, value: Markup) -> Markup {
    html! {
        li.contact-item {
            span.contact-icon { (icon) }
            div {
                strong { (label) ":" }
                br;
                (value)
            }
        }
    }
}

/// Renders the contacts view.
pub fn render_view(settings: &Settings) -> Markup {
    let contacts = &settings.contacts;
    let phone = match configured(&contacts.phone) {
        Some(p) => html! { a href=(tel_href(p)) { (p) } },
        None => html! { (PHONE_PLACEHOLDER) },
    };
    let email = match configured(&contacts.email) {
        Some(e) => html! { a href={ "mailto:" (e) } { (e) } },
        None => html! { (EMAIL_PLACEHOLDER) },
    };
    let address = html! { (configured(&contacts.address).unwrap_or(ADDRESS_PLACEHOLDER)) };

    html! {
        h2.section-header { "📞 Contact information" }
        div.info-box {
            ul.contact-list {
                (contact_item("📞", "Phone", phone))
                (contact_item("📧", "Email", email))
                (contact_item("📍", "Address", address))
            }
        }
    }
}

/// Phone and email under the sidebar menu, for whichever are configured.
pub fn render_quick_contacts(settings: &Settings) -> Markup {
    let phone = configured(&settings.contacts.phone);
    let email = configured(&settings.contacts.email);
    html! {
        @if phone.is_some() || email.is_some() {
            div.quick-contacts {
                hr;
                @if let Some(phone) = phone {
                    p { strong { "📞 Phone:" } }
                    p { em { (phone) } }
                }
                @if let Some(email) = email {
                    p { strong { "📧 Email:" } }
                    p { em { (email) } }
                }
            }
        }
    }
}

pub fn render_footer(settings: &Settings) -> Markup {
    html! {
        footer.footer {
            p { (settings.copyright()) }
            @if settings.footer.show_tagline {
                p.tagline { (settings.company.icon) " " (settings.company.tagline) }
            }
        }
    }
}
