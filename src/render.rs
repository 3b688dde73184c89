//! Page assembly.
//!
//! Every request renders the whole page from scratch, in this order:
//!
//! ```text
//! <head>  theme::apply          colour tokens + base CSS + variant
//! <aside> nav::render_menu      menu with the session's page marked current
//!         contacts quick block
//! <main>  view for the current page (home / documents / gallery / contacts)
//!         contacts::render_footer
//! ```
//!
//! The view is picked from the [`PageKind`] of the session's menu entry, so
//! relabelling a menu item in the config never changes which view it opens.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated config text is escaped, except the company description,
//! which is rendered from Markdown.

use crate::config::Settings;
use crate::nav::{self, LinkMode, Menu, NavState, PageKind};
use crate::{contacts, documents, gallery, theme};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::path::Path;

/// Everything a render needs; borrowed for the duration of one request.
pub struct RenderContext<'a> {
    pub settings: &'a Settings,
    /// Site root against which document and gallery folders resolve.
    pub root: &'a Path,
    pub menu: &'a Menu,
    pub state: &'a NavState,
    pub mode: LinkMode,
}

/// Renders the base HTML document structure
fn base_document(settings: &Settings, title: &str, content: Markup) -> Markup {
    let variant = theme::StyleVariant::from_name(&settings.theme.style_variant);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                (theme::apply(&settings.theme, variant))
            }
            body class=(variant.body_class()) {
                (content)
            }
        }
    }
}

fn markdown_to_html(text: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(text));
    out
}

/// Renders the home view.
fn render_home(ctx: &RenderContext) -> Markup {
    let company = &ctx.settings.company;
    html! {
        h2.section-header { "About us" }
        div.info-box {
            h3 { (company.name) }
            div.description { (PreEscaped(markdown_to_html(&company.description))) }
            @if let Some(info) = company.additional_info.as_deref().filter(|s| !s.trim().is_empty()) {
                p.additional-info { (info) }
            }
        }
        (nav::render_quick_nav(ctx.menu, ctx.state, ctx.mode))
    }
}

/// Renders the view for a page kind.
pub fn render_view(ctx: &RenderContext, page: PageKind) -> Markup {
    match page {
        PageKind::Home => render_home(ctx),
        PageKind::Documents => documents::render_view(ctx.settings, ctx.root, ctx.mode),
        PageKind::Gallery => gallery::render_view(ctx.settings, ctx.root, ctx.mode),
        PageKind::Contacts => contacts::render_view(ctx.settings),
    }
}

/// Renders the full page for the session's current navigation state.
pub fn render_page(ctx: &RenderContext) -> Markup {
    let settings = ctx.settings;
    let entry = ctx.state.entry(ctx.menu);
    let title = if entry.page == PageKind::Home {
        settings.company.name.clone()
    } else {
        format!("{} - {}", entry.label, settings.company.name)
    };

    let content = html! {
        div.layout {
            aside.sidebar {
                nav.site-nav {
                    (nav::render_menu(ctx.menu, ctx.state, ctx.mode))
                }
                (contacts::render_quick_contacts(settings))
            }
            div.content {
                header.site-header {
                    h1.main-header { (settings.company.icon) " " (settings.company.name) }
                }
                main.main data-page=(entry.page.as_str()) {
                    (render_view(ctx, entry.page))
                }
                (contacts::render_footer(settings))
            }
        }
    };

    base_document(settings, &title, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn page_for(site: &TestSite, stored: Option<&str>, mode: LinkMode) -> String {
        let settings = site.settings();
        let menu = Menu::from_settings(&settings);
        let state = NavState::resolve(stored, &menu);
        let ctx = RenderContext {
            settings: &settings,
            root: site.root(),
            menu: &menu,
            state: &state,
            mode,
        };
        render_page(&ctx).into_string()
    }

    #[test]
    fn page_starts_with_doctype_and_style() {
        let site = TestSite::new();
        let html = page_for(&site, None, LinkMode::Live);
        assert!(html.starts_with("<!DOCTYPE html>"));
        let style = html.find("<style>").unwrap();
        let body = html.find("<body").unwrap();
        assert!(style < body);
        assert!(html.contains(r#"class="variant-classic""#));
    }

    #[test]
    fn home_shows_company_and_quick_nav() {
        let site = TestSite::with_config(
            r#"
[company]
name = "Teplo"
description = "We keep **homes** warm."
additional_info = "Since 1998."
"#,
        );
        let html = page_for(&site, None, LinkMode::Live);
        assert!(html.contains("<title>Teplo</title>"));
        assert!(html.contains("🔥 Teplo"));
        assert!(html.contains("<strong>homes</strong>"));
        assert!(html.contains("Since 1998."));
        assert!(html.contains("View documents"));
        assert!(html.contains(r#"data-page="home""#));
    }

    #[test]
    fn each_page_renders_its_view() {
        let site = TestSite::new();
        let cases = [
            ("Documents", "Official documents"),
            ("Gallery", "Photo gallery"),
            ("Contacts", "Contact information"),
        ];
        for (label, heading) in cases {
            let html = page_for(&site, Some(label), LinkMode::Live);
            assert!(html.contains(heading), "{label} page missing {heading:?}");
            assert!(html.contains(&format!("<title>{label} - Company name</title>")));
        }
    }

    #[test]
    fn missing_assets_keep_the_rest_of_the_page() {
        let site = TestSite::new();
        for label in ["Documents", "Gallery"] {
            let html = page_for(&site, Some(label), LinkMode::Live);
            assert!(html.contains("nav-list"));
            assert!(html.contains("main-header"));
            assert!(html.contains("All rights reserved."));
        }
        assert!(page_for(&site, Some("Documents"), LinkMode::Live).contains("Document not found"));
        assert!(page_for(&site, Some("Gallery"), LinkMode::Live).contains("no photos"));
    }

    #[test]
    fn stale_state_renders_first_item() {
        let site = TestSite::with_config(
            r#"
[[menu.items]]
icon = "📞"
label = "Reach us"
page = "contacts"

[[menu.items]]
icon = "🏠"
label = "Start"
page = "home"
"#,
        );
        let html = page_for(&site, Some("Gallery"), LinkMode::Live);
        assert!(html.contains(r#"data-page="contacts""#));
    }

    #[test]
    fn variant_class_on_body() {
        let site = TestSite::with_config("[theme]\nstyle_variant = \"corporate\"\n");
        let html = page_for(&site, None, LinkMode::Static { depth: 0 });
        assert!(html.contains(r#"<body class="variant-corporate">"#));
    }

    #[test]
    fn unknown_variant_renders_classic() {
        let site = TestSite::with_config("[theme]\nstyle_variant = \"neon\"\n");
        let html = page_for(&site, None, LinkMode::Live);
        assert!(html.contains(r#"<body class="variant-classic">"#));
        assert!(!html.contains(".variant-"));
    }
}
