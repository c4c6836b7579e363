//! Static catalog: color palettes, supported languages, example prompts.
//!
//! Palette descriptions are fed verbatim into the website prompt as the
//! "Color Palette Guidelines", so they are written for the model, not the user.

/// The four Tailwind classes a palette assigns to color roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub bg: &'static str,
    pub primary: &'static str,
    pub text: &'static str,
    pub subtle: &'static str,
}

/// A named color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub swatch: Swatch,
    pub description: &'static str,
}

pub const PALETTES: &[Palette] = &[
    Palette {
        name: "Modern",
        swatch: Swatch {
            bg: "bg-white",
            primary: "bg-indigo-600",
            text: "text-gray-800",
            subtle: "bg-gray-50",
        },
        description: "Primary: Indigo for trust and modernity. Use for buttons, links, and key \
highlights. Backgrounds: White and light gray for a clean, spacious feel. Text: Dark gray for \
readability.",
    },
    Palette {
        name: "Vibrant",
        swatch: Swatch {
            bg: "bg-white",
            primary: "bg-orange-500",
            text: "text-gray-900",
            subtle: "bg-yellow-50",
        },
        description: "Primary: Bright orange for energy and creativity. Use for calls-to-action. \
Backgrounds: Soft yellow and white for a warm, inviting atmosphere. Text: Nearly black for strong \
contrast.",
    },
    Palette {
        name: "Corporate",
        swatch: Swatch {
            bg: "bg-white",
            primary: "bg-blue-800",
            text: "text-gray-700",
            subtle: "bg-slate-100",
        },
        description: "Primary: Deep blue for professionalism and stability. Use for headers and \
buttons. Backgrounds: Cool-toned slate and white for a serious, clean look. Text: Muted gray for \
a formal tone.",
    },
    Palette {
        name: "Elegant",
        swatch: Swatch {
            bg: "bg-gray-900",
            primary: "bg-amber-400",
            text: "text-white",
            subtle: "bg-gray-800",
        },
        description: "Primary: Gold/amber for a touch of luxury. Use for highlights and buttons. \
Backgrounds: Dark charcoal and black for a sophisticated, premium feel. Text: White for crisp \
readability on dark backgrounds.",
    },
];

/// Look up a palette by exact name.
pub fn find_palette(name: &str) -> Option<&'static Palette> {
    PALETTES.iter().find(|p| p.name == name)
}

/// Palette guideline text, or empty if the name is unknown.
pub fn palette_details(name: &str) -> &'static str {
    find_palette(name).map(|p| p.description).unwrap_or("")
}

/// A language the dashboard summary can be produced and spoken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub label: &'static str,
    pub code: &'static str,
}

/// Supported languages. The first entry is the fallback.
pub const LANGUAGES: &[Language] = &[
    Language {
        label: "English",
        code: "en-US",
    },
    Language {
        label: "తెలుగు",
        code: "te-IN",
    },
    Language {
        label: "हिन्दी",
        code: "hi-IN",
    },
];

/// Resolve a BCP-47 code to a supported language, falling back to the first one.
pub fn resolve_language(code: &str) -> &'static Language {
    LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .unwrap_or(&LANGUAGES[0])
}

/// Canned business descriptions offered from the examples menu.
#[derive(Debug, Clone, Copy)]
pub struct ExamplePrompt {
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const EXAMPLE_PROMPTS: &[ExamplePrompt] = &[
    ExamplePrompt {
        label: "Coffee Shop",
        prompt: "I need a website for my coffee shop in Brooklyn. We sell organic coffee and \
pastries. I want a modern and minimalist design.",
    },
    ExamplePrompt {
        label: "Personal Portfolio",
        prompt: "Create a personal portfolio for a software developer named Alex Doe. It should \
have an about section, a projects section, and a contact form.",
    },
    ExamplePrompt {
        label: "Restaurant",
        prompt: "A website for a family-owned Italian restaurant. Include a menu, photos of the \
food, and a way to book a table.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_have_unique_names() {
        let mut names: Vec<_> = PALETTES.iter().map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), PALETTES.len());
    }

    #[test]
    fn find_palette_by_name() {
        let p = find_palette("Corporate").unwrap();
        assert_eq!(p.swatch.primary, "bg-blue-800");
        assert!(find_palette("corporate").is_none());
    }

    #[test]
    fn palette_details_unknown_is_empty() {
        assert!(palette_details("Modern").starts_with("Primary: Indigo"));
        assert_eq!(palette_details("Neon"), "");
    }

    #[test]
    fn resolve_known_language() {
        assert_eq!(resolve_language("hi-IN").label, "हिन्दी");
        assert_eq!(resolve_language("te-IN").code, "te-IN");
    }

    #[test]
    fn resolve_unknown_language_falls_back_to_first() {
        let lang = resolve_language("fr-FR");
        assert_eq!(lang.code, "en-US");
        assert_eq!(lang.label, "English");
    }

    #[test]
    fn example_prompts_are_not_empty() {
        assert_eq!(EXAMPLE_PROMPTS.len(), 3);
        assert!(EXAMPLE_PROMPTS.iter().all(|e| !e.prompt.is_empty()));
    }
}
