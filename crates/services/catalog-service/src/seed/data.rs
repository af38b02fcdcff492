//! Marketplace categories written by the seed command.

/// Top-level category with its subcategories.
#[derive(Debug, Clone, Copy)]
pub struct SeedCategory {
    pub name: &'static str,
    pub slug: &'static str,
    pub color: Option<&'static str>,
    pub subcategories: &'static [SeedSubcategory],
}

#[derive(Debug, Clone, Copy)]
pub struct SeedSubcategory {
    pub name: &'static str,
    pub slug: &'static str,
}

const fn sub(name: &'static str, slug: &'static str) -> SeedSubcategory {
    SeedSubcategory { name, slug }
}

pub const CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: "All",
        slug: "all",
        color: None,
        subcategories: &[],
    },
    SeedCategory {
        name: "Business & Money",
        slug: "business-money",
        color: Some("#FFB347"),
        subcategories: &[
            sub("Accounting", "accounting"),
            sub("Entrepreneurship", "entrepreneurship"),
            sub("Gigs & Side Projects", "gigs-side-projects"),
            sub("Investing", "investing"),
            sub("Management & Leadership", "management-leadership"),
            sub("Marketing & Sales", "marketing-sales"),
            sub("Networking, Careers & Jobs", "networking-careers-jobs"),
            sub("Personal Finance", "personal-finance"),
            sub("Real Estate", "real-estate"),
        ],
    },
    SeedCategory {
        name: "Software Development",
        slug: "software-development",
        color: Some("#7EC8E3"),
        subcategories: &[
            sub("Web Development", "web-development"),
            sub("Mobile Development", "mobile-development"),
            sub("Game Development", "game-development"),
            sub("Programming Languages", "programming-languages"),
            sub("DevOps", "devops"),
        ],
    },
    SeedCategory {
        name: "Writing & Publishing",
        slug: "writing-publishing",
        color: Some("#D8B5FF"),
        subcategories: &[
            sub("Fiction", "fiction"),
            sub("Non-Fiction", "non-fiction"),
            sub("Blogging", "blogging"),
            sub("Copywriting", "copywriting"),
            sub("Self-Publishing", "self-publishing"),
        ],
    },
    SeedCategory {
        name: "Other",
        slug: "other",
        color: None,
        subcategories: &[],
    },
    SeedCategory {
        name: "Education",
        slug: "education",
        color: Some("#FFE066"),
        subcategories: &[
            sub("Online Courses", "online-courses"),
            sub("Tutoring", "tutoring"),
            sub("Test Preparation", "test-preparation"),
            sub("Language Learning", "language-learning"),
        ],
    },
    SeedCategory {
        name: "Self Improvement",
        slug: "self-improvement",
        color: Some("#96E6B3"),
        subcategories: &[
            sub("Productivity", "productivity"),
            sub("Personal Development", "personal-development"),
            sub("Mindfulness", "mindfulness"),
            sub("Career Growth", "career-growth"),
        ],
    },
    SeedCategory {
        name: "Fitness & Health",
        slug: "fitness-health",
        color: Some("#FF9AA2"),
        subcategories: &[
            sub("Workout Plans", "workout-plans"),
            sub("Nutrition", "nutrition"),
            sub("Mental Health", "mental-health"),
            sub("Yoga", "yoga"),
        ],
    },
    SeedCategory {
        name: "Design",
        slug: "design",
        color: Some("#B5B9FF"),
        subcategories: &[
            sub("UI/UX", "ui-ux"),
            sub("Graphic Design", "graphic-design"),
            sub("3D Modeling", "3d-modeling"),
            sub("Typography", "typography"),
        ],
    },
    SeedCategory {
        name: "Drawing & Painting",
        slug: "drawing-painting",
        color: Some("#FFCAB0"),
        subcategories: &[
            sub("Watercolor", "watercolor"),
            sub("Acrylic", "acrylic"),
            sub("Oil", "oil"),
            sub("Pastel", "pastel"),
            sub("Charcoal", "charcoal"),
        ],
    },
    SeedCategory {
        name: "Music",
        slug: "music",
        color: Some("#FFD700"),
        subcategories: &[
            sub("Songwriting", "songwriting"),
            sub("Music Production", "music-production"),
            sub("Music Theory", "music-theory"),
            sub("Music History", "music-history"),
        ],
    },
    SeedCategory {
        name: "Photography",
        slug: "photography",
        color: Some("#FF6B6B"),
        subcategories: &[
            sub("Portrait", "portrait"),
            sub("Landscape", "landscape"),
            sub("Street Photography", "street-photography"),
            sub("Nature", "nature"),
            sub("Macro", "macro"),
        ],
    },
];
