//! Page layout for loaded content.
//!
//! Every topic page shares one layout: a navigation sidebar built from the
//! route table (category → subcategory → topic, in catalog order) and a main
//! area holding the module's rendered HTML. Routes with no registered module,
//! or whose module file cannot be found, get the not-found page instead.
//!
//! Uses [maud](https://maud.lambda.xyz/); interpolated text is escaped, and
//! only the module HTML produced by pulldown-cmark is inserted pre-escaped.

use crate::loader::Content;
use crate::table::RouteTable;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Navigation for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct NavGroup {
    pub category: String,
    pub sections: Vec<NavSection>,
}

/// Navigation for one subcategory.
#[derive(Debug, Clone, PartialEq)]
pub struct NavSection {
    pub title: String,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub title: String,
    pub path: String,
}

/// Group table entries into navigation, keeping table order.
///
/// Consecutive entries with the same category (and subcategory) share a
/// group (and section).
pub fn navigation(table: &RouteTable) -> Vec<NavGroup> {
    let mut groups: Vec<NavGroup> = Vec::new();
    for entry in table.entries() {
        let link = NavLink {
            title: entry.title.clone(),
            path: entry.path.clone(),
        };
        if groups.last().is_none_or(|g| g.category != entry.category) {
            groups.push(NavGroup {
                category: entry.category.clone(),
                sections: Vec::new(),
            });
        }
        let Some(group) = groups.last_mut() else {
            continue;
        };
        match group.sections.last_mut() {
            Some(section) if section.title == entry.subcategory => section.links.push(link),
            _ => group.sections.push(NavSection {
                title: entry.subcategory.clone(),
                links: vec![link],
            }),
        }
    }
    groups
}

/// Render a loaded module inside the shared layout.
pub fn render_page(content: &Content, current_path: &str, nav: &[NavGroup]) -> Markup {
    let title = content
        .title
        .as_deref()
        .unwrap_or_else(|| content.module.as_str());
    layout(
        title,
        current_path,
        nav,
        html! {
            article data-module=(content.module.as_str()) {
                (PreEscaped(content.html.as_str()))
            }
        },
    )
}

/// Render the fallback page for a route with no loadable module.
pub fn render_not_found(route: &str, nav: &[NavGroup]) -> Markup {
    layout(
        "Page not found",
        route,
        nav,
        html! {
            section.not-found {
                h1 { "Page not found" }
                p { "Nothing is published at " code { (route) } "." }
            }
        },
    )
}

fn layout(title: &str, current_path: &str, nav: &[NavGroup], body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                nav.topic-nav {
                    @for group in nav {
                        (render_nav_group(group, current_path))
                    }
                }
                main { (body) }
            }
        }
    }
}

fn render_nav_group(group: &NavGroup, current_path: &str) -> Markup {
    html! {
        section.nav-group {
            h2 { (group.category) }
            @for section in &group.sections {
                h3 { (section.title) }
                ul {
                    @for link in &section.links {
                        @let is_current = link.path == current_path;
                        li class=[is_current.then_some("current")] {
                            a href=(link.path) { (link.title) }
                        }
                    }
                }
            }
        }
    }
}
