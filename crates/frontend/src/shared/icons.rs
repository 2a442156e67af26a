use leptos::prelude::*;

const CIRCLE: &str = r#"<circle cx="12" cy="12" r="10"/>"#;

/// Inner SVG markup and pixel size of a named glyph.
fn glyph(name: &str) -> (String, u32) {
    let (markup, size) = match name {
        "file-search" => (
            concat!(
                r#"<path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h5"/><path d="M14 2v6h6"/>"#,
                r#"<circle cx="16.5" cy="16.5" r="3.5"/><path d="m21 21-2-2"/>"#,
            )
            .to_string(),
            20,
        ),
        "check-circle" => (format!(r#"{CIRCLE}<path d="m9 12 2 2 4-4"/>"#), 20),
        "x-circle" => (format!(r#"{CIRCLE}<path d="m15 9-6 6"/><path d="m9 9 6 6"/>"#), 16),
        "clock" => (format!(r#"{CIRCLE}<path d="M12 6v6l4 2"/>"#), 20),
        "send" => (r#"<path d="m22 2-7 20-4-9-9-4Z"/><path d="M22 2 11 13"/>"#.to_string(), 20),
        "trophy" => (
            concat!(
                r#"<path d="M6 9H4.5a2.5 2.5 0 0 1 0-5H6"/><path d="M18 9h1.5a2.5 2.5 0 0 0 0-5H18"/>"#,
                r#"<path d="M4 22h16"/><path d="M18 2H6v7a6 6 0 0 0 12 0V2Z"/>"#,
                r#"<path d="M10 14.66V17c0 .55-.47.98-.97 1.21C7.85 18.75 7 20.24 7 22"/>"#,
                r#"<path d="M14 14.66V17c0 .55.47.98.97 1.21C16.15 18.75 17 20.24 17 22"/>"#,
            )
            .to_string(),
            20,
        ),
        "package" => (
            concat!(
                r#"<path d="M21 16V8a2 2 0 0 0-1-1.73l-7-4a2 2 0 0 0-2 0l-7 4A2 2 0 0 0 3 8v8a2 2 0 0 0 1 1.73l7 4a2 2 0 0 0 2 0l7-4A2 2 0 0 0 21 16z"/>"#,
                r#"<path d="M3.27 6.96 12 12l8.73-5.04"/><path d="M12 22V12"/>"#,
            )
            .to_string(),
            20,
        ),
        "calendar" => (
            r#"<rect x="3" y="4" width="18" height="18" rx="2"/><path d="M16 2v4M8 2v4M3 10h18"/>"#
                .to_string(),
            20,
        ),
        "plus" => (r#"<path d="M5 12h14M12 5v14"/>"#.to_string(), 16),
        "x" => (r#"<path d="M18 6 6 18M6 6l12 12"/>"#.to_string(), 14),
        "rotate-ccw" => (
            r#"<path d="M3 12a9 9 0 1 0 9-9 9.75 9.75 0 0 0-6.74 2.74L3 8"/><path d="M3 3v5h5"/>"#
                .to_string(),
            16,
        ),
        "message" => (
            r#"<path d="M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z"/>"#.to_string(),
            16,
        ),
        "bell" => (
            r#"<path d="M6 8a6 6 0 0 1 12 0c0 7 3 9 3 9H3s3-2 3-9"/><path d="M10.3 21a1.94 1.94 0 0 0 3.4 0"/>"#
                .to_string(),
            20,
        ),
        "chevron-left" => (r#"<path d="m15 18-6-6 6-6"/>"#.to_string(), 16),
        "chevron-right" => (r#"<path d="m9 18 6-6-6-6"/>"#.to_string(), 16),
        _ => (CIRCLE.to_string(), 20),
    };
    (markup, size)
}

/// Inline stroke icon by name. Unknown names render a plain circle.
pub fn icon(name: &str) -> AnyView {
    let (markup, size) = glyph(name);
    view! {
        <svg
            width=size
            height=size
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
            inner_html=markup
        ></svg>
    }
    .into_any()
}
