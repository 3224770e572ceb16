//! The closed catalog of leadership principles questions are drawn from.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrincipleDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const CATALOG: [PrincipleDefinition; 16] = [
    PrincipleDefinition {
        id: "customer-obsession",
        title: "Customer Obsession",
        description: "Leaders start with the customer and work backwards. They work vigorously to earn and keep customer trust.",
    },
    PrincipleDefinition {
        id: "ownership",
        title: "Ownership",
        description: "Leaders are owners. They think long term and don't sacrifice long-term value for short-term results.",
    },
    PrincipleDefinition {
        id: "invent-and-simplify",
        title: "Invent and Simplify",
        description: "Leaders expect and require innovation and invention from their teams and always find ways to simplify.",
    },
    PrincipleDefinition {
        id: "are-right-a-lot",
        title: "Are Right, A Lot",
        description: "Leaders have strong judgment and good instincts. They seek diverse perspectives and work to disconfirm their beliefs.",
    },
    PrincipleDefinition {
        id: "learn-and-be-curious",
        title: "Learn and Be Curious",
        description: "Leaders are never done learning and always seek to improve themselves. They explore new possibilities.",
    },
    PrincipleDefinition {
        id: "hire-and-develop-the-best",
        title: "Hire and Develop the Best",
        description: "Leaders raise the performance bar with every hire and promotion. They recognize exceptional talent and develop it.",
    },
    PrincipleDefinition {
        id: "insist-on-the-highest-standards",
        title: "Insist on the Highest Standards",
        description: "Leaders have relentlessly high standards. They ensure defects do not get sent down the line and problems stay fixed.",
    },
    PrincipleDefinition {
        id: "think-big",
        title: "Think Big",
        description: "Leaders create and communicate a bold direction that inspires results. They look around corners for ways to serve customers.",
    },
    PrincipleDefinition {
        id: "bias-for-action",
        title: "Bias for Action",
        description: "Speed matters in business. Many decisions and actions are reversible and do not need extensive study.",
    },
    PrincipleDefinition {
        id: "frugality",
        title: "Frugality",
        description: "Accomplish more with less. Constraints breed resourcefulness, self-sufficiency, and invention.",
    },
    PrincipleDefinition {
        id: "earn-trust",
        title: "Earn Trust",
        description: "Leaders listen attentively, speak candidly, and treat others respectfully. They are vocally self-critical.",
    },
    PrincipleDefinition {
        id: "dive-deep",
        title: "Dive Deep",
        description: "Leaders operate at all levels, stay connected to the details, and audit frequently. No task is beneath them.",
    },
    PrincipleDefinition {
        id: "have-backbone-disagree-and-commit",
        title: "Have Backbone; Disagree and Commit",
        description: "Leaders respectfully challenge decisions when they disagree. Once a decision is made, they commit wholly.",
    },
    PrincipleDefinition {
        id: "deliver-results",
        title: "Deliver Results",
        description: "Leaders focus on the key inputs for their business and deliver them with the right quality and in a timely fashion.",
    },
    PrincipleDefinition {
        id: "strive-to-be-earths-best-employer",
        title: "Strive to be Earth's Best Employer",
        description: "Leaders work every day to create a safer, more productive, more diverse, and more just work environment.",
    },
    PrincipleDefinition {
        id: "success-and-scale-bring-broad-responsibility",
        title: "Success and Scale Bring Broad Responsibility",
        description: "Leaders create more than they consume and leave things better than how they found them.",
    },
];

/// Looks up a principle by title or id, ignoring case, punctuation and spacing.
pub fn find_principle(name: &str) -> Option<&'static PrincipleDefinition> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    CATALOG
        .iter()
        .find(|p| normalize(p.title) == wanted || normalize(p.id) == wanted)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Numbered title list for prompts.
pub fn catalog_listing() -> String {
    CATALOG
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {}", i + 1, p.title))
        .collect::<Vec<_>>()
        .join("\n")
}
