//! Sector groups used to classify apprenticeship category slugs.
//!
//! Each group owns a fixed set of hyphenated lowercase slugs. Free text is normalised by
//! lowercasing and replacing spaces with hyphens before lookup. Surrounding whitespace is
//! deliberately kept, so `"software-engineering "` does not match.

/// A sector grouping of apprenticeship categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryGroup {
    Technology,
    Finance,
    Business,
    Engineering,
    Marketing,
    Design,
    Legal,
    Construction,
    Retail,
    Hospitality,
    Hr,
    Property,
    PublicSector,
    Science,
}

impl CategoryGroup {
    /// Every group in declaration order.
    pub const ALL: [CategoryGroup; 14] = [
        CategoryGroup::Technology,
        CategoryGroup::Finance,
        CategoryGroup::Business,
        CategoryGroup::Engineering,
        CategoryGroup::Marketing,
        CategoryGroup::Design,
        CategoryGroup::Legal,
        CategoryGroup::Construction,
        CategoryGroup::Retail,
        CategoryGroup::Hospitality,
        CategoryGroup::Hr,
        CategoryGroup::Property,
        CategoryGroup::PublicSector,
        CategoryGroup::Science,
    ];

    /// Upper snake case name used in configuration, e.g. `PUBLIC_SECTOR`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Technology => "TECHNOLOGY",
            Self::Finance => "FINANCE",
            Self::Business => "BUSINESS",
            Self::Engineering => "ENGINEERING",
            Self::Marketing => "MARKETING",
            Self::Design => "DESIGN",
            Self::Legal => "LEGAL",
            Self::Construction => "CONSTRUCTION",
            Self::Retail => "RETAIL",
            Self::Hospitality => "HOSPITALITY",
            Self::Hr => "HR",
            Self::Property => "PROPERTY",
            Self::PublicSector => "PUBLIC_SECTOR",
            Self::Science => "SCIENCE",
        }
    }

    /// Looks up a group by its configuration name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.name().eq_ignore_ascii_case(name))
    }

    /// The slugs belonging to this group.
    pub fn slugs(self) -> &'static [&'static str] {
        match self {
            Self::Technology => &[
                "computer-science",
                "cyber-security",
                "data-analysis",
                "front-end-development",
                "information-technology",
                "software-engineering",
                "artificial-intelligence",
            ],
            Self::Finance => &[
                "accounting",
                "actuary",
                "audit",
                "tax",
                "banking",
                "commercial-banking",
                "investment-banking",
                "retail-banking",
                "economics",
                "fiances",
                "insurance-and-risk-management",
            ],
            Self::Business => &[
                "business-management",
                "business-operations",
                "management-consulting",
                "market-research",
                "procurement",
                "project-management",
                "sales",
                "sustainability",
            ],
            Self::Engineering => &[
                "aeronautical-and-aerospace-engineering",
                "automotive-engineering",
                "chemical-engineering",
                "civil-engineering",
                "computer-systems-engineering",
                "electronic-and-electrical-engineering",
                "engineering",
                "manufacturing",
                "material-and-mineral-engineering",
                "mechanical-engineering",
            ],
            Self::Marketing => &[
                "advertising",
                "digital-marketing",
                "marketing",
                "pr-and-communications",
                "social-media-marketing",
            ],
            Self::Design => &[
                "architecture",
                "fashion-design",
                "graphic-design",
                "product-design",
                "ux-ui-design",
            ],
            Self::Legal => &[
                "commercial-law",
                "corporate-law",
                "employment-law",
                "intellectual-property-law",
                "legal-law",
            ],
            Self::Construction => &[
                "construction",
                "carpentry-and-joinery",
                "electrician",
                "plumbing",
            ],
            Self::Retail => &[
                "consumer-product-fmcg",
                "consumer-services",
                "retail-manager",
                "merchandising",
            ],
            Self::Hospitality => &["hospitality-management", "bar-and-waiting", "catering"],
            Self::Hr => &["human-resources", "recruitment"],
            Self::Property => &[
                "property-development",
                "property-management",
                "surveying",
                "property-planning",
            ],
            Self::PublicSector => &[
                "teaching",
                "government",
                "social-work",
                "armed-forces",
                "prison-officer",
                "healthcare",
                "firefighter",
                "police-officer",
            ],
            Self::Science => &[
                "chemistry",
                "environmental-science",
                "medicine",
                "pharmaceutical",
                "research",
                "science",
            ],
        }
    }

    /// Whether `category` belongs to this group after normalisation.
    pub fn contains(self, category: &str) -> bool {
        let slug = normalize(category);
        self.slugs().iter().any(|s| *s == slug)
    }

    /// Every group containing `category`, in declaration order.
    pub fn find_groups(category: &str) -> Vec<CategoryGroup> {
        let slug = normalize(category);
        Self::ALL
            .into_iter()
            .filter(|group| group.slugs().iter().any(|s| *s == slug))
            .collect()
    }

    /// Whether `category` belongs to at least one group.
    pub fn is_valid(category: &str) -> bool {
        !Self::find_groups(category).is_empty()
    }

    /// Groups for a listing category.
    ///
    /// Slugs are looked up first; a category that is not a known slug is treated as a
    /// GOV.UK route name and mapped through the route table. Unknown categories map to
    /// no groups.
    pub fn map_category(category: &str) -> Vec<CategoryGroup> {
        let groups = Self::find_groups(category);
        if !groups.is_empty() {
            return groups;
        }

        ROUTE_GROUPS
            .iter()
            .find(|(route, _)| route.eq_ignore_ascii_case(category.trim()))
            .map(|(_, groups)| groups.to_vec())
            .unwrap_or_default()
    }

    /// Every known slug across all groups, in declaration order.
    pub fn all_categories() -> Vec<&'static str> {
        Self::ALL
            .into_iter()
            .flat_map(|group| group.slugs().iter().copied())
            .collect()
    }
}

/// GOV.UK apprenticeship routes and the groups their listings belong to.
const ROUTE_GROUPS: [(&str, &[CategoryGroup]); 15] = [
    (
        "Agriculture, environmental and animal care",
        &[CategoryGroup::Science],
    ),
    ("Business and administration", &[CategoryGroup::Business]),
    ("Care services", &[CategoryGroup::PublicSector]),
    ("Catering and hospitality", &[CategoryGroup::Hospitality]),
    (
        "Construction and the built environment",
        &[CategoryGroup::Construction],
    ),
    ("Creative and design", &[CategoryGroup::Design]),
    ("Digital", &[CategoryGroup::Technology]),
    ("Education and early years", &[CategoryGroup::PublicSector]),
    ("Engineering and manufacturing", &[CategoryGroup::Engineering]),
    ("Hair and beauty", &[CategoryGroup::Retail]),
    (
        "Health and science",
        &[CategoryGroup::Science, CategoryGroup::PublicSector],
    ),
    (
        "Legal, finance and accounting",
        &[CategoryGroup::Legal, CategoryGroup::Finance],
    ),
    ("Protective services", &[CategoryGroup::PublicSector]),
    (
        "Sales, marketing and procurement",
        &[CategoryGroup::Marketing, CategoryGroup::Business],
    ),
    ("Transport and logistics", &[CategoryGroup::Business]),
];

fn normalize(category: &str) -> String {
    category.to_lowercase().replace(' ', "-")
}
