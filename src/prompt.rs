//! Renders the featured-image prompt sent to the text-to-image model.

pub const STYLE_PROMPT: &str =
    "pseudo realistic cell-shaded style with focus and focus blur effects";

/// Constraint lines every prompt carries, in template order.
pub const CONSTRAINTS: &[&str] = &[
    STYLE_PROMPT,
    "Scene or object-based imagery: rooms, courtyards, open city/suburban spaces, OR closeup of everyday household/office items",
    "Examples: red stapler on desk, keyboard with coffee cup, violin on stand, pots in kitchen sink, towel on towel rail, empty office room, urban courtyard",
    "Modern, tech-oriented color scheme",
    "Limited color palette (3-5 colors)",
    "Include at least one element in sharp focus and one element with blur/depth-of-field effect",
    "No people or animals",
    "No text or words in the image",
    "Landscape orientation suitable for a blog header",
];

const INTRO: &str =
    "Create a tech-oriented featured image for a blog post using everyday scenes or objects.";
const AESTHETIC: &str = "Technical aesthetic: Clean, modern, minimalist with depth";

/// Title and content are interpolated verbatim.
pub fn build_prompt(title: &str, content: &str) -> String {
    let mut prompt = format!(
        "{}\n\nPost Title: {}\nPost Theme: {}\n\nStyle Requirements:\n",
        INTRO, title, content
    );
    for constraint in CONSTRAINTS {
        prompt.push_str("- ");
        prompt.push_str(constraint);
        prompt.push('\n');
    }
    prompt.push('\n');
    prompt.push_str(AESTHETIC);
    prompt.push('\n');
    prompt
}
