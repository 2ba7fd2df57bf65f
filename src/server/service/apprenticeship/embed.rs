//! Announcement embeds for new listings.

use crate::server::{
    bot::reply::EmbedSpec,
    model::{
        apprenticeship::{Apprenticeship, ApprenticeshipSource},
        category_group::CategoryGroup,
    },
    util::time::date_to_unix,
};

/// GOV.UK brand blue.
pub const GOV_UK_BLUE: u32 = 0x1D70B8;

pub const HIGHER_IN_TEAL: u32 = 0x00B8A9;

/// `software-engineering` becomes `• Software Engineering`.
fn format_category(slug: &str) -> String {
    let words = slug
        .split(['-', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalise)
        .collect::<Vec<_>>();

    format!("• {}", words.join(" "))
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn listing_embed(listing: &Apprenticeship) -> EmbedSpec {
    let title = if listing.title.is_empty() {
        tracing::warn!("Apprenticeship {} has no title", listing.id);
        "Apprenticeship Opportunity"
    } else {
        listing.title.as_str()
    };
    let title = if listing.company.is_empty() {
        format!("🎓 {}", title)
    } else {
        format!("🎓 {} @ {}", title, listing.company)
    };

    let mut description = String::new();
    if !listing.location.is_empty() {
        description.push_str(&format!("📍 **Location:** {}\n\n", listing.location));
    }
    if !listing.salary.is_empty() {
        description.push_str(&format!("💰 **Salary:** {}", listing.salary));
    }

    let colour = match listing.source {
        ApprenticeshipSource::FindAnApprenticeship => GOV_UK_BLUE,
        ApprenticeshipSource::HigherIn => HIGHER_IN_TEAL,
    };

    let mut embed = EmbedSpec::new()
        .title(title)
        .url(listing.url.clone())
        .colour(colour)
        .footer(format!("Source: {}", listing.source.name()));
    if !description.is_empty() {
        embed = embed.description(description.trim_end());
    }

    if let Some(posted_on) = listing.posted_on {
        embed = embed.field("📅 Posted", format!("<t:{}:R>", date_to_unix(posted_on)), true);
    }
    if let Some(closes_on) = listing.closes_on {
        let unix = date_to_unix(closes_on);
        embed = embed
            .field("⏰ Closing Date", format!("<t:{}:D>", unix), true)
            .field("⌛ Time Left", format!("<t:{}:R>", unix), true);
    }
    if listing.source == ApprenticeshipSource::HigherIn
        && CategoryGroup::is_valid(&listing.category)
    {
        embed = embed.field("📚 Category", format_category(&listing.category), false);
    }

    embed.field(
        "🔗 Apply Now",
        format!("[Click here to apply]({})", listing.url),
        false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_listing_embed() {
        let listing = Apprenticeship::from_entity(test_utils::fixture::apprenticeship::entity());

        let embed = listing_embed(&listing);

        assert_eq!(
            embed.title.as_deref(),
            Some("🎓 Software Developer Apprentice @ Acme Digital Ltd")
        );
        assert_eq!(embed.colour, Some(GOV_UK_BLUE));
        assert_eq!(
            embed.description.as_deref(),
            Some("📍 **Location:** Manchester (M1 1AA)\n\n💰 **Salary:** £22,000 a year")
        );
        let names: Vec<_> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["📅 Posted", "⏰ Closing Date", "⌛ Time Left", "🔗 Apply Now"]
        );
        assert_eq!(embed.fields[1].value, "<t:1760659200:D>");
    }

    #[test]
    fn sparse_listing_embed() {
        let mut listing =
            Apprenticeship::from_entity(test_utils::fixture::apprenticeship::entity());
        listing.title.clear();
        listing.company.clear();
        listing.location.clear();
        listing.salary.clear();
        listing.posted_on = None;
        listing.closes_on = None;

        let embed = listing_embed(&listing);

        assert_eq!(embed.title.as_deref(), Some("🎓 Apprenticeship Opportunity"));
        assert_eq!(embed.description, None);
        assert_eq!(embed.fields.len(), 1);
    }

    #[test]
    fn higherin_listing_shows_its_category() {
        let mut listing =
            Apprenticeship::from_entity(test_utils::fixture::apprenticeship::entity());
        listing.source = ApprenticeshipSource::HigherIn;
        listing.category = "ux-ui-design".to_string();

        let embed = listing_embed(&listing);

        assert_eq!(embed.colour, Some(HIGHER_IN_TEAL));
        let category = embed
            .fields
            .iter()
            .find(|f| f.name == "📚 Category")
            .unwrap();
        assert_eq!(category.value, "• Ux Ui Design");
    }
}
