//! Navigation: the menu model and the per-session "current page" state.
//!
//! The menu comes from `[[menu.items]]`. Each entry has a label, which is
//! what the session remembers, and a [`PageKind`], which decides the view.
//! [`NavState`] is the only mutable state in the site; it belongs to one
//! session and is handed to every render explicitly.
//!
//! ## Invariant
//!
//! A [`NavState`] always names a label present in the menu it was resolved
//! against. [`NavState::resolve`] repairs a stored value that no longer
//! matches (the config changed between requests) by falling back to the
//! first configured item.
//!
//! ## Link modes
//!
//! The live site changes page by posting the selected label back to the
//! server, which updates the session cookie and redirects. A static export
//! has no session, so the same menu renders as plain links to one file per
//! page. [`LinkMode`] carries that difference so views are written once.

use crate::config::{MenuItem, Settings};
use crate::documents::DocumentKey;
use maud::{Markup, html};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Which view a menu entry opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    Documents,
    Gallery,
    Contacts,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [
        PageKind::Home,
        PageKind::Documents,
        PageKind::Gallery,
        PageKind::Contacts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::Documents => "documents",
            PageKind::Gallery => "gallery",
            PageKind::Contacts => "contacts",
        }
    }

    /// Parse a `page = "..."` value, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    /// View for an item with no explicit `page`, by its menu position.
    fn by_position(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(PageKind::Home)
    }
}

/// A resolved menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub icon: String,
    pub label: String,
    pub page: PageKind,
}

impl MenuEntry {
    fn from_item(index: usize, item: &MenuItem) -> Self {
        let page = match item.page.as_deref().map(PageKind::parse) {
            Some(Some(kind)) => kind,
            Some(None) => {
                tracing::warn!(
                    "Unknown page {:?} for menu item {:?}, using position",
                    item.page,
                    item.label
                );
                PageKind::by_position(index)
            }
            None => PageKind::by_position(index),
        };
        Self {
            icon: item.icon.clone(),
            label: item.label.clone(),
            page,
        }
    }

    /// Icon and label as shown in the menu.
    pub fn caption(&self) -> String {
        format!("{} {}", self.icon, self.label).trim().to_string()
    }
}

/// The ordered, never-empty side navigation.
#[derive(Debug, Clone)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn from_settings(settings: &Settings) -> Self {
        let entries = settings
            .menu_items()
            .iter()
            .enumerate()
            .map(|(i, item)| MenuEntry::from_item(i, item))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn first(&self) -> &MenuEntry {
        // `Settings::menu_items` falls back to the stock items, so never empty.
        &self.entries[0]
    }

    pub fn find(&self, label: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// First entry opening the given view.
    pub fn entry_for(&self, page: PageKind) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.page == page)
    }

    /// URL path of every entry in a static export, in menu order.
    ///
    /// The first entry is the site root; the rest live under the name of
    /// their view, numbered when a view appears more than once.
    pub fn static_paths(&self) -> Vec<String> {
        let mut seen: Vec<&str> = Vec::new();
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                if i == 0 {
                    return "/".to_string();
                }
                let name = entry.page.as_str();
                seen.push(name);
                let count = seen.iter().filter(|n| **n == name).count();
                if count == 1 {
                    format!("/{name}/")
                } else {
                    format!("/{name}-{count}/")
                }
            })
            .collect()
    }

    fn static_path(&self, label: &str) -> String {
        let index = self
            .entries
            .iter()
            .position(|e| e.label == label)
            .unwrap_or(0);
        self.static_paths().swap_remove(index)
    }
}

/// The session's current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    current: String,
}

impl NavState {
    /// State for a fresh session: the Home entry, or the first item when
    /// the menu has no Home view.
    pub fn initial(menu: &Menu) -> Self {
        let entry = menu.entry_for(PageKind::Home).unwrap_or_else(|| menu.first());
        Self {
            current: entry.label.clone(),
        }
    }

    /// Rebuild state from a stored label, repairing it if it went stale.
    pub fn resolve(stored: Option<&str>, menu: &Menu) -> Self {
        match stored {
            None => Self::initial(menu),
            Some(label) if menu.find(label).is_some() => Self {
                current: label.to_string(),
            },
            Some(label) => {
                tracing::debug!(
                    "Stored page {label:?} is not in the menu, resetting to {:?}",
                    menu.first().label
                );
                Self {
                    current: menu.first().label.clone(),
                }
            }
        }
    }

    /// Transition to the page with the given label.
    ///
    /// Returns `None` when the label is not a menu item; the caller keeps
    /// its current state.
    pub fn select(&self, label: &str, menu: &Menu) -> Option<Self> {
        let entry = menu.find(label)?;
        if entry.label != self.current {
            tracing::debug!("Navigating from {:?} to {:?}", self.current, entry.label);
        }
        Some(Self {
            current: entry.label.clone(),
        })
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// The menu entry for the current page.
    pub fn entry<'a>(&self, menu: &'a Menu) -> &'a MenuEntry {
        menu.find(&self.current).unwrap_or_else(|| menu.first())
    }
}

/// Characters escaped in a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A file name as one URL path segment.
pub fn encode_segment(name: &str) -> String {
    utf8_percent_encode(name, PATH_SEGMENT).to_string()
}

/// How navigation and asset links are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// Served site: navigation posts to `/navigate`, assets come from routes.
    Live,
    /// Exported site: navigation links to per-page files, assets are copies.
    /// Links are relative; `depth` is how many directories below the export
    /// root the page being rendered lives.
    Static { depth: usize },
}

impl LinkMode {
    /// Static mode for the page exported at `url` (one of
    /// [`Menu::static_paths`]).
    pub fn static_at(url: &str) -> Self {
        let depth = url.split('/').filter(|s| !s.is_empty()).count();
        LinkMode::Static { depth }
    }

    /// `target` (relative to the export root) as seen from a page `depth`
    /// directories down.
    fn relative(depth: usize, target: &str) -> String {
        if depth == 0 {
            format!("./{target}")
        } else {
            format!("{}{target}", "../".repeat(depth))
        }
    }

    /// A control that switches the session to `entry`.
    pub fn nav_control(self, menu: &Menu, entry: &MenuEntry, class: &str, body: Markup) -> Markup {
        match self {
            LinkMode::Live => html! {
                form.nav-form method="post" action="/navigate" {
                    button class=(class) type="submit" name="page" value=(entry.label) {
                        (body)
                    }
                }
            },
            LinkMode::Static { depth } => {
                let path = menu.static_path(&entry.label);
                let href = Self::relative(depth, path.trim_start_matches('/'));
                html! {
                    a class=(class) href=(href) { (body) }
                }
            }
        }
    }

    /// Exported documents live under `documents/<key>/` so two keys sharing
    /// a file name never collide.
    pub fn download_href(self, key: DocumentKey, filename: &str) -> String {
        match self {
            LinkMode::Live => format!("/documents/{}/download", key.as_str()),
            LinkMode::Static { depth } => Self::relative(
                depth,
                &format!("documents/{}/{}", key.as_str(), encode_segment(filename)),
            ),
        }
    }

    pub fn photo_href(self, name: &str) -> String {
        let target = format!("gallery/{}", encode_segment(name));
        match self {
            LinkMode::Live => format!("/{target}"),
            LinkMode::Static { depth } => Self::relative(depth, &target),
        }
    }
}

/// Renders the side menu (hamburger toggle on small screens).
pub fn render_menu(menu: &Menu, state: &NavState, mode: LinkMode) -> Markup {
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        div.nav-panel {
            label.nav-close for="nav-toggle" { "×" }
            ul.nav-list {
                @for entry in menu.entries() {
                    @let is_current = entry.label == state.current();
                    li.nav-item.current[is_current] aria-current=[is_current.then_some("page")] {
                        (mode.nav_control(menu, entry, "nav-link", html! {
                            span.nav-icon { (entry.icon) }
                            span.nav-label { (entry.label) }
                        }))
                    }
                }
            }
        }
    }
}

/// Card text for the quick-navigation block on the home page.
fn quick_nav_copy(page: PageKind) -> Option<(&'static str, &'static str)> {
    match page {
        PageKind::Documents => Some((
            "View our official documents and licenses",
            "View documents",
        )),
        PageKind::Gallery => Some((
            "See photos of our equipment and facilities",
            "Open gallery",
        )),
        PageKind::Contacts => Some(("Get in touch with us for information", "Our contacts")),
        PageKind::Home => None,
    }
}

/// Renders quick-navigation cards: one per non-home menu entry other than
/// the current one.
pub fn render_quick_nav(menu: &Menu, state: &NavState, mode: LinkMode) -> Markup {
    let cards: Vec<(&MenuEntry, (&str, &str))> = menu
        .entries()
        .iter()
        .filter(|e| e.label != state.current())
        .filter_map(|e| quick_nav_copy(e.page).map(|copy| (e, copy)))
        .collect();

    html! {
        @if !cards.is_empty() {
            div.nav-cards {
                @for (entry, (blurb, action)) in cards {
                    div.nav-card {
                        h3 { (entry.caption()) }
                        p { (blurb) }
                        (mode.nav_control(menu, entry, "btn", html! { (action) }))
                    }
                }
            }
        }
    }
}
