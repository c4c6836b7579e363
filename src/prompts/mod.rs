//! Prompt templates for the three model calls.
//!
//! - WEBSITE_PROMPT: full single-page site, optionally with a modification request
//! - NEWSLETTER_PROMPT: short promotional message for chat apps
//! - DASHBOARD_ANALYSIS_PROMPT: localized summary of dashboard metrics

pub mod sanitize;
pub mod template;

use std::collections::HashMap;

use crate::catalog::Language;
use crate::generation::WebsiteRequest;

pub use sanitize::{is_html_document, sanitize};
pub use template::PromptTemplate;

pub const WEBSITE_PROMPT: PromptTemplate = PromptTemplate::new(
    "website",
    r#"
You are an expert web developer AI who creates beautiful, single-page websites for non-technical business owners.
The user provides their personal and business details, a business description (in any language), and chooses a color palette. Your task is to generate a complete, responsive, single-page HTML5 website **entirely in English**.

**User Provided Details:**
*   **User's Name:** {USER_NAME}
*   **Business Name:** {BUSINESS_NAME}
*   **Contact Email:** {USER_EMAIL}
*   **Contact Phone:** {USER_PHONE}
*   **Business Description:** "{USER_INPUT}"
*   **Chosen Color Palette:** {PALETTE_NAME}
*   **Color Palette Guidelines:** {PALETTE_DETAILS}
{MODIFICATION_SECTION}

**Critical Instructions:**

1.  **Language & Content:**
    *   Interpret the user's business description, regardless of the original language.
    *   Generate all website text (headings, paragraphs, buttons) in clear, professional **English**.
    *   Create compelling copy for a hero section, an "About Us" section, and a "Services/Products" section based on the user's description.
    *   The "About Us" section can mention the owner, **{USER_NAME}**, by name.

2.  **Modification Handling:**
    *   If a "**Modification Request**" is provided, you **MUST** prioritize it.
    *   This request is an instruction to change the *already generated* website concept.
    *   Apply the modification precisely. For example, if the request is "change the headline to 'Welcome!'", you must change only the main headline text and keep the rest of the website structure, content, and styling as consistent as possible with the original request. Do not treat it as a new prompt for a new website.

3.  **Branding & Contact Info (MANDATORY):**
    *   The website title must be the business name: `<title>{BUSINESS_NAME}</title>`.
    *   The business name, **"{BUSINESS_NAME}"**, must be the main heading in the hero section.
    *   Create a "Contact Us" section at the bottom. This section **MUST** display the provided contact details:
        *   Email: **{USER_EMAIL}** (make it a `mailto:` link)
        *   Phone: **{USER_PHONE}** (make it a `tel:` link)

4.  **Styling with Tailwind CSS (MANDATORY):**
    *   You **MUST** use Tailwind CSS for all styling via the CDN script: `<script src="https://cdn.tailwindcss.com"></script>`.
    *   **Strictly follow the user's chosen color palette.** Use the provided guidelines ({PALETTE_DETAILS}) to apply Tailwind color classes. For example, if the primary color is 'bg-indigo-600', use that class for buttons and key elements.
    *   Apply classes directly to HTML elements. **DO NOT** use a '<style>' block.
    *   Ensure the layout is modern, clean, mobile-first, and fully responsive.
    *   Interactive elements (buttons, links) MUST have hover and focus states (e.g., `hover:bg-indigo-700`).

5.  **Structure & Images:**
    *   The entire website must be a single HTML file.
    *   You **MUST NOT** use `<img>` tags or CSS `background-image`. The design must be excellent using only typography, layout, and the chosen color scheme.
    *   Include a simple header with the business name and a simple footer with the contact information and a copyright notice (e.g., © 2024 {BUSINESS_NAME}).

6.  **Final Output Format:**
    *   Return **ONLY** the complete, valid HTML code.
    *   The response must start with `<!DOCTYPE html>` and end with `</html>`.
    *   Do **NOT** include any markdown (like ```html`), commentary, or text outside of the HTML code itself.
"#,
);

pub const NEWSLETTER_PROMPT: PromptTemplate = PromptTemplate::new(
    "newsletter",
    r#"
You are an expert marketing copywriter. Your task is to generate a short, exciting promotional text message for a business to share on social media like WhatsApp.
The message should be upbeat, use a couple of relevant emojis, and encourage people to visit the new website without providing a direct link.

**Business Details:**
*   **Business Name:** {BUSINESS_NAME}
*   **Description:** "{USER_INPUT}"

**Instructions:**
1.  Keep the message concise and easy to read (around 2-3 sentences).
2.  Start with an exciting hook.
3.  Clearly mention the business name.
4.  Include a strong call-to-action to visit the new website, but **do not include any URLs or placeholders for URLs.** For example, you can say "Find us online!" or "Check out our new website!".
5.  Generate the message in **English**.
6.  Return **ONLY** the message text. Do not include any extra commentary or labels.

Example output:
"🚀 Big news! {BUSINESS_NAME} is now online! Check out our brand new website for amazing offers and find out more about what we do. See you there!"
"#,
);

pub const DASHBOARD_ANALYSIS_PROMPT: PromptTemplate = PromptTemplate::new(
    "dashboard-analysis",
    r#"
You are an expert business analyst AI. Your task is to analyze the provided dashboard data for a business and generate a concise summary.
This summary must be in the user's requested language. Based on the data, you should also provide one key insight or actionable suggestion.

**Dashboard Data Snapshot:**
{DASHBOARD_DATA}

**User Language Details:**
* Language Name: {LANGUAGE_NAME}
* Language Code: {LANGUAGE_CODE}

**CRITICAL INSTRUCTIONS:**
1.  Your entire response **MUST** be in the requested language ({LANGUAGE_NAME}).
2.  The tone should be professional but encouraging.
3.  Start with a greeting acknowledging the business name.
4.  Summarize the key metrics provided.
5.  End with one clear, actionable piece of advice based on the data.
6.  Return **ONLY** the translated text. Do not include any English, markdown, or other text if the requested language is not English.
"#,
);

/// Render the modification section. Empty instruction → empty string.
pub fn modification_section(instruction: Option<&str>) -> String {
    match instruction.map(str::trim) {
        Some(text) if !text.is_empty() => format!("\n**Modification Request:** \"{text}\""),
        _ => String::new(),
    }
}

/// Build the website-generation prompt.
pub fn build_website_prompt(req: &WebsiteRequest) -> String {
    let values: HashMap<&str, String> = HashMap::from([
        ("USER_NAME", req.user_name.clone()),
        ("BUSINESS_NAME", req.business_name.clone()),
        ("USER_EMAIL", req.user_email.clone()),
        ("USER_PHONE", req.user_phone.clone()),
        ("USER_INPUT", req.description.clone()),
        ("PALETTE_NAME", req.palette_name.clone()),
        ("PALETTE_DETAILS", req.palette_details.clone()),
        (
            "MODIFICATION_SECTION",
            modification_section(req.modification.as_deref()),
        ),
    ]);
    WEBSITE_PROMPT.render(&values)
}

/// Build the marketing-text prompt.
pub fn build_newsletter_prompt(description: &str, business_name: &str) -> String {
    let values: HashMap<&str, String> = HashMap::from([
        ("BUSINESS_NAME", business_name.to_string()),
        ("USER_INPUT", description.to_string()),
    ]);
    NEWSLETTER_PROMPT.render(&values)
}

/// Build the dashboard-analysis prompt for an already-resolved language.
pub fn build_dashboard_prompt(dashboard_data: &str, language: &Language) -> String {
    let values: HashMap<&str, String> = HashMap::from([
        ("DASHBOARD_DATA", dashboard_data.to_string()),
        ("LANGUAGE_NAME", language.label.to_string()),
        ("LANGUAGE_CODE", language.code.to_string()),
    ]);
    DASHBOARD_ANALYSIS_PROMPT.render(&values)
}
