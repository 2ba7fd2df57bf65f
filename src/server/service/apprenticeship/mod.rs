//! Apprenticeship sync: scrape, store what is new, announce it.
//!
//! The database is the system of record. A listing is new when its id is not yet stored
//! for the current academic year; only new listings are inserted and announced.

pub mod embed;
pub mod higherin;
pub mod parse;
pub mod routes;
pub mod scraper;

use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, CreateAllowedMentions, CreateMessage, Http, RoleId};

use crate::server::{
    bot::context::BotContext,
    config::{AnnouncementChannel, Config},
    data::apprenticeship::ApprenticeshipRepository,
    error::AppError,
    model::{apprenticeship::Apprenticeship, category_group::CategoryGroup},
    service::apprenticeship::{
        embed::listing_embed,
        scraper::{HttpFetcher, PageFetcher, ScrapeDelays, Scraper},
    },
    util::time::academic_year,
};

/// Embeds per announcement message.
const EMBEDS_PER_MESSAGE: usize = 10;

const ANNOUNCE_DELAY: Duration = Duration::from_secs(1);

const PING_TEXT: &str = "New opportunities just dropped!";

/// Outcome of one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    pub scraped: usize,
    pub new_listings: usize,
    pub announced_channels: usize,
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scraped, {} new, announced in {} channels",
            self.scraped, self.new_listings, self.announced_channels
        )
    }
}

pub struct ApprenticeshipSyncService<'a> {
    db: &'a DatabaseConnection,
    http: &'a Http,
    config: &'a Config,
}

impl<'a> ApprenticeshipSyncService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: &'a Http, config: &'a Config) -> Self {
        Self { db, http, config }
    }

    /// Runs one full sync.
    ///
    /// # Arguments
    /// - `scraper` - Scraper to collect listings with
    /// - `today` - Current date, used for date parsing and the academic year
    ///
    /// # Returns
    /// - `Ok(SyncSummary)` - Counts for the run
    /// - `Err(AppError::DbErr)` - Loading or storing listings failed
    pub async fn sync<F: PageFetcher>(
        &self,
        scraper: &Scraper<F>,
        today: NaiveDate,
    ) -> Result<SyncSummary, AppError> {
        let scraped = scraper.scrape_all(today).await;
        let scraped_count = scraped.len();

        let new_listings = self.store_new(scraped, today).await?;

        let announced_channels = if new_listings.is_empty() {
            tracing::info!("No new apprenticeships to announce");
            0
        } else {
            self.announce(&new_listings).await
        };

        Ok(SyncSummary {
            scraped: scraped_count,
            new_listings: new_listings.len(),
            announced_channels,
        })
    }

    /// Stores the listings not yet known for the current academic year.
    ///
    /// # Returns
    /// - `Ok(Vec<Apprenticeship>)` - The listings that were inserted, in scrape order
    /// - `Err(DbErr)` - Database error during lookup or insert
    pub async fn store_new(
        &self,
        scraped: Vec<Apprenticeship>,
        today: NaiveDate,
    ) -> Result<Vec<Apprenticeship>, AppError> {
        let repo = ApprenticeshipRepository::new(self.db);
        let year = academic_year(today);

        let existing = repo.existing_ids(year).await?;
        let new_listings = scraped
            .into_iter()
            .filter(|listing| !existing.contains(&listing.id))
            .collect::<Vec<_>>();

        let inserted = repo.insert_many(year, &new_listings).await?;
        tracing::info!(
            "Stored {} new apprenticeships for academic year {}",
            inserted,
            year
        );

        Ok(new_listings)
    }

    /// Posts the listings to every configured channel.
    ///
    /// A channel that fails is logged and skipped.
    ///
    /// # Returns
    /// - Number of channels every batch was delivered to
    pub async fn announce(&self, listings: &[Apprenticeship]) -> usize {
        let roles = ping_roles(listings, self.config);
        let mut delivered = 0;

        for (i, channel) in self.config.apprenticeship_channels.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(ANNOUNCE_DELAY).await;
            }

            match self.announce_to(channel, listings, &roles).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::error!(
                    "Failed to announce apprenticeships in channel {} of guild {}: {}",
                    channel.channel_id,
                    channel.guild_id,
                    e
                ),
            }
        }

        delivered
    }

    async fn announce_to(
        &self,
        channel: &AnnouncementChannel,
        listings: &[Apprenticeship],
        roles: &[u64],
    ) -> Result<(), serenity::Error> {
        let channel_id = ChannelId::new(channel.channel_id);

        let mentions = CreateAllowedMentions::new()
            .roles(roles.iter().copied().map(RoleId::new));
        channel_id
            .send_message(
                self.http,
                CreateMessage::new()
                    .content(ping_message(roles))
                    .allowed_mentions(mentions),
            )
            .await?;

        for batch in listings.chunks(EMBEDS_PER_MESSAGE) {
            tokio::time::sleep(ANNOUNCE_DELAY).await;

            let embeds = batch
                .iter()
                .map(|listing| listing_embed(listing).to_create_embed())
                .collect::<Vec<_>>();
            channel_id
                .send_message(self.http, CreateMessage::new().embeds(embeds))
                .await?;
        }

        Ok(())
    }
}

/// Roles to mention for a set of new listings.
///
/// The union of the roles configured for every group the listings map to, in first
/// seen order. Falls back to `ROLES_TO_PING` when no group role applies.
pub fn ping_roles(listings: &[Apprenticeship], config: &Config) -> Vec<u64> {
    let mut roles = Vec::new();

    for listing in listings {
        for group in CategoryGroup::map_category(&listing.category) {
            let Some(group_roles) = config.category_group_roles.get(&group) else {
                continue;
            };
            for role in group_roles {
                if !roles.contains(role) {
                    roles.push(*role);
                }
            }
        }
    }

    if roles.is_empty() {
        return config.roles_to_ping.clone();
    }
    roles
}

pub fn ping_message(roles: &[u64]) -> String {
    roles.iter().fold(PING_TEXT.to_string(), |mut message, role| {
        message.push_str(&format!(" <@&{}>", role));
        message
    })
}

/// Clears the running flag when a sync ends, including on error.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Runs a sync against the live site unless one is already running.
///
/// # Returns
/// - `Ok(Some(SyncSummary))` - The sync ran
/// - `Ok(None)` - Another sync was already running, nothing was done
/// - `Err(AppError)` - The sync could not be set up or storing failed
pub async fn sync_if_idle(app: &BotContext) -> Result<Option<SyncSummary>, AppError> {
    if app
        .sync_running
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Ok(None);
    }
    let _guard = RunningGuard(&app.sync_running);

    let scraper = Scraper::new(HttpFetcher::new()?, ScrapeDelays::default())?;
    let today = Utc::now().date_naive();

    let summary = ApprenticeshipSyncService::new(&app.db, &app.http, &app.config)
        .sync(&scraper, today)
        .await?;

    Ok(Some(summary))
}
