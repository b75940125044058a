// ABOUTME: HTML page, sitemap, and robots.txt rendering for the localized front end
// ABOUTME: Builds the upload page from a locale's translation table using maud

use crate::constants::{form, routes};
use crate::locales::{self, Translation, DEFAULT_LOCALE, SUPPORTED};
use chrono::NaiveDate;
use icoconv_core::constants::limits;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
:root { --accent: #1e40af; --muted: #6b7280; --border: #e5e7eb; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; color: #111827; background: #f9fafb; }
main { max-width: 40rem; margin: 0 auto; padding: 2rem 1rem; }
header { text-align: center; }
.badge { display: inline-block; padding: .2rem .6rem; border-radius: 999px; background: #dbeafe; color: var(--accent); font-size: .8rem; }
.card { background: #fff; border: 1px solid var(--border); border-radius: .75rem; padding: 1.5rem; margin-top: 1.5rem; }
label { display: block; font-weight: 600; margin: 1rem 0 .4rem; }
input[type=file], select { width: 100%; }
button { margin-top: 1.25rem; width: 100%; padding: .75rem; border: 0; border-radius: .5rem; background: var(--accent); color: #fff; font-size: 1rem; cursor: pointer; }
pre { background: #111827; color: #f9fafb; padding: .75rem; border-radius: .5rem; overflow-x: auto; }
nav.languages { display: flex; flex-wrap: wrap; gap: .5rem; justify-content: center; margin-top: 2rem; }
nav.languages a { color: var(--muted); text-decoration: none; font-size: .85rem; }
nav.languages a[aria-current] { color: var(--accent); font-weight: 600; }
footer { text-align: center; color: var(--muted); font-size: .8rem; margin-top: 2rem; }
"#;

const SNIPPET: &str = r#"<link rel="icon" href="/favicon.ico" type="image/x-icon">"#;

// Client-side checks driven by the data attributes on the upload hint and copy button
const SCRIPT: &str = r#"
(function () {
  var file = document.getElementById("file");
  var hint = document.querySelector("p.hint");
  if (file && hint) {
    file.addEventListener("change", function () {
      var chosen = file.files[0];
      var tooLarge = chosen && chosen.size > Number(hint.dataset.maxBytes);
      var message = tooLarge ? hint.dataset.error : "";
      hint.textContent = message;
      file.setCustomValidity(message);
    });
  }
  document.querySelectorAll("button[data-copied]").forEach(function (button) {
    button.addEventListener("click", function () {
      var code = button.previousElementSibling.textContent;
      var label = button.textContent;
      navigator.clipboard.writeText(code).then(function () {
        button.textContent = button.dataset.copied;
        setTimeout(function () { button.textContent = label; }, 2000);
      });
    });
  });
})();
"#;

/// Render the localized upload page for `code`.
///
/// `max_upload_bytes` feeds the in-browser size check shown before submitting.
pub fn render_index(
    code: &str,
    t: &Translation,
    base_url: &str,
    max_upload_bytes: usize,
) -> String {
    page(code, t, base_url, max_upload_bytes).into_string()
}

fn page(code: &str, t: &Translation, base_url: &str, max_upload_bytes: usize) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(code) dir=(t.dir.as_str()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (t.seo_title) }
                meta name="description" content=(t.seo_desc);
                meta name="keywords" content=(t.keywords);
                link rel="canonical" href={ (base_url) "/" (code) };
                @for alternate in SUPPORTED {
                    link rel="alternate" hreflang=(alternate) href={ (base_url) "/" (alternate) };
                }
                link rel="alternate" hreflang="x-default" href={ (base_url) "/" (DEFAULT_LOCALE) };
                link rel="icon" href=(routes::FAVICON) type="image/x-icon";
                style { (PreEscaped(STYLE)) }
            }
            body {
                main {
                    header {
                        span.badge { (t.badge) }
                        h1 { (t.h1) }
                        p { (t.subtitle) }
                    }
                    section.card id="create" {
                        h2 { (t.tab_create) }
                        (upload_form(t, max_upload_bytes))
                    }
                    section.card id="guide" {
                        h2 { (t.tab_guide) }
                        (guide(t))
                    }
                    (language_switcher(code))
                    footer { p { (t.footer) } }
                }
                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
}

fn upload_form(t: &Translation, max_upload_bytes: usize) -> Markup {
    html! {
        form action=(routes::GENERATE) method="post" enctype="multipart/form-data" {
            label for="file" { (t.upload_label) }
            input type="file" id="file" name=(form::FILE_FIELD) accept="image/*" required;
            p.hint data-max-bytes=(max_upload_bytes) data-error=(t.error_large) {}
            label for="size" { (t.size_label) }
            select id="size" name=(form::SIZE_FIELD) {
                @for &edge in limits::OFFERED_EDGES {
                    @if edge == limits::DEFAULT_EDGE {
                        option value=(edge) selected {
                            (edge) "×" (edge) " (" (t.recommend) ")"
                        }
                    } @else {
                        option value=(edge) { (edge) "×" (edge) }
                    }
                }
            }
            button type="submit" { (t.btn_submit) }
        }
    }
}

fn guide(t: &Translation) -> Markup {
    html! {
        h3 { (t.guide_preview_title) }
        p { (t.guide_preview_desc) }
        ol {
            li {
                strong { (t.step1_title) }
                p { (t.step1_desc) }
                code { (t.step1_file_path) "favicon.ico" }
            }
            li {
                strong { (t.step2_title) }
                p { (t.step2_desc) }
                pre { code { (SNIPPET) } }
                button type="button" data-copied=(t.guide_copied) { (t.guide_copy_btn) }
            }
        }
    }
}

fn language_switcher(current: &str) -> Markup {
    html! {
        nav.languages {
            @for code in SUPPORTED {
                @if let Some(translation) = locales::lookup(code) {
                    @if *code == current {
                        a href={ "/" (code) } lang=(code) aria-current="page" { (translation.name) }
                    } @else {
                        a href={ "/" (code) } lang=(code) { (translation.name) }
                    }
                }
            }
        }
    }
}

/// Render the sitemap listing every localized page.
pub fn render_sitemap(base_url: &str, date: NaiveDate) -> String {
    let lastmod = date.format("%Y-%m-%d");
    let urls: String = SUPPORTED
        .iter()
        .map(|code| {
            let priority = if *code == DEFAULT_LOCALE { "1.0" } else { "0.8" };
            format!(
                "<url><loc>{}/{}</loc><lastmod>{}</lastmod><changefreq>weekly</changefreq><priority>{}</priority></url>",
                base_url, code, lastmod, priority
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        urls
    )
}

pub fn render_robots(base_url: &str) -> String {
    [
        "User-agent: *".to_string(),
        "Allow: /".to_string(),
        format!("Disallow: {}", routes::GENERATE),
        format!("Sitemap: {}{}", base_url, routes::SITEMAP),
    ]
    .join("\n")
}
