use axum::http::StatusCode;
use axum::response::Html;

/// One server-rendered section of the portal.
#[derive(Debug, Clone, Copy)]
pub struct PageRoute {
    pub path: &'static str,
    pub title: &'static str,
}

/// The data-driven route table: one shell page per section.
pub const SECTION_ROUTES: [PageRoute; 8] = [
    PageRoute {
        path: "/dashboard",
        title: "Dashboard",
    },
    PageRoute {
        path: "/materials",
        title: "Materials",
    },
    PageRoute {
        path: "/calendar",
        title: "Calendar",
    },
    PageRoute {
        path: "/schedule",
        title: "Schedule",
    },
    PageRoute {
        path: "/chat",
        title: "Chat",
    },
    PageRoute {
        path: "/journal",
        title: "Journal",
    },
    PageRoute {
        path: "/information",
        title: "Information",
    },
    PageRoute {
        path: "/profile",
        title: "Profile & Settings",
    },
];

pub async fn index() -> Html<String> {
    Html(shell("/", "UniPortal"))
}

pub async fn login() -> Html<String> {
    Html(shell("/login", "Sign in"))
}

pub fn section(route: &PageRoute) -> Html<String> {
    Html(shell(route.path, route.title))
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(shell("/404", "Page not found")))
}

/// The shared page shell, parameterized by base path and title.
///
/// Client assets mount onto `data-base-path`; everything interpolated here is
/// static route-table data, never user input.
fn shell(base_path: &str, title: &str) -> String {
    let nav: String = SECTION_ROUTES
        .iter()
        .map(|route| format!(r#"<li><a href="{}">{}</a></li>"#, route.path, route.title))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} — UniPortal</title>
</head>
<body data-base-path="{base_path}">
  <header><h1>{title}</h1></header>
  <nav><ul>{nav}</ul></nav>
  <main id="app"></main>
</body>
</html>
"#
    )
}
