use std::collections::{HashMap, HashSet};
use std::mem;
use tracing::{debug, info, warn};

use super::{
    notify::Notification,
    storage::{persist_watchlist, restore_watchlist, WatchlistStore},
    view::{derive_view, CoinCard, DashboardView, LoadMore, PLACEHOLDER_CARDS},
};
use crate::{
    error::FetchError,
    fetcher::{CoinSource, PAGE_SIZE},
    models::{Coin, Currency, SortKey},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    CurrencyChange,
    Refresh,
    LoadMore,
}

/// Handed out when a fetch starts and given back with its result.
///
/// `generation` is the request counter for list-replacing fetches and the
/// list generation for load-more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub kind: FetchKind,
    pub generation: u64,
    pub currency: Currency,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    /// The list changed since the request started; the result was dropped.
    Stale,
}

/// View-state of the market dashboard.
///
/// Every trigger that touches the network is split into a `begin_*` step that
/// updates the loading flags and returns a [`FetchTicket`], and [`complete`]
/// which merges the result. Replacing requests are ordered by a request
/// counter, so only the latest one may land. Load-more results are stamped
/// with the list generation, which advances when a replacement lands or a
/// currency change starts; a page fetched for an older list is discarded.
///
/// [`complete`]: Dashboard::complete
pub struct Dashboard<S: WatchlistStore> {
    coins: Vec<Coin>,
    search: String,
    currency: Currency,
    sort: SortKey,
    watchlist: HashSet<String>,
    page: u32,
    refreshing: bool,
    loading_more: bool,
    has_error: bool,
    generation: u64,
    list_generation: u64,
    list_currency: Currency,
    notifications: Vec<Notification>,
    store: S,
}

impl<S: WatchlistStore> Dashboard<S> {
    /// Builds the initial state and restores the watchlist from `store`.
    pub fn mount(initial: Vec<Coin>, store: S) -> Self {
        let watchlist = restore_watchlist(&store).unwrap_or_else(|err| {
            debug!(error = %err, "Starting with an empty watchlist");
            HashSet::new()
        });

        Self {
            coins: initial,
            search: String::new(),
            currency: Currency::default(),
            sort: SortKey::default(),
            watchlist,
            page: 1,
            refreshing: false,
            loading_more: false,
            has_error: false,
            generation: 0,
            list_generation: 0,
            list_currency: Currency::default(),
            notifications: Vec::new(),
            store,
        }
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Currency the loaded list is denominated in. Differs from `currency()`
    /// after a currency change that has not landed.
    pub fn list_currency(&self) -> Currency {
        self.list_currency
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn watchlist(&self) -> &HashSet<String> {
        &self.watchlist
    }

    pub fn is_watchlisted(&self, id: &str) -> bool {
        self.watchlist.contains(id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    fn begin_replace(&mut self, kind: FetchKind) -> FetchTicket {
        self.refreshing = true;
        self.generation += 1;
        FetchTicket {
            kind,
            generation: self.generation,
            currency: self.currency,
            page: 1,
        }
    }

    /// First load. Skipped when an initial list was supplied.
    pub fn begin_startup(&mut self) -> Option<FetchTicket> {
        if self.coins.is_empty() || self.currency != Currency::default() {
            Some(self.begin_replace(FetchKind::CurrencyChange))
        } else {
            None
        }
    }

    /// `None` when `currency` is already selected.
    pub fn begin_currency_change(&mut self, currency: Currency) -> Option<FetchTicket> {
        if currency == self.currency {
            return None;
        }
        self.currency = currency;
        self.list_generation += 1;
        Some(self.begin_replace(FetchKind::CurrencyChange))
    }

    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.begin_replace(FetchKind::Refresh)
    }

    /// `None` while a search filter is active or another load-more is in
    /// flight.
    pub fn begin_load_more(&mut self) -> Option<FetchTicket> {
        if !self.search.is_empty() || self.loading_more {
            return None;
        }
        self.loading_more = true;
        Some(FetchTicket {
            kind: FetchKind::LoadMore,
            generation: self.list_generation,
            currency: self.list_currency,
            page: self.page + 1,
        })
    }

    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Coin>, FetchError>,
    ) -> Completion {
        match ticket.kind {
            FetchKind::CurrencyChange | FetchKind::Refresh => self.complete_replace(ticket, result),
            FetchKind::LoadMore => self.complete_load_more(ticket, result),
        }
    }

    fn complete_replace(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Coin>, FetchError>,
    ) -> Completion {
        if ticket.generation != self.generation {
            debug!(?ticket, current = self.generation, "Dropping superseded response");
            return Completion::Stale;
        }
        self.refreshing = false;

        match result {
            Ok(coins) => {
                info!(currency = %ticket.currency, count = coins.len(), "Coin list replaced");
                self.coins = coins;
                self.page = 1;
                self.has_error = false;
                self.list_currency = ticket.currency;
                self.list_generation += 1;
                if ticket.kind == FetchKind::Refresh {
                    self.notifications.push(Notification::info(
                        "Refreshed",
                        "Market data updated successfully",
                    ));
                }
                Completion::Applied
            }
            Err(err) => {
                warn!(error = %err, kind = ?ticket.kind, "Failed to fetch coins");
                if ticket.kind == FetchKind::Refresh {
                    self.notifications
                        .push(Notification::error("Failed to refresh data"));
                } else {
                    self.has_error = true;
                    self.notifications.push(Notification::error(
                        "Failed to fetch coins in selected currency",
                    ));
                }
                Completion::Failed
            }
        }
    }

    fn complete_load_more(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Coin>, FetchError>,
    ) -> Completion {
        self.loading_more = false;
        if ticket.generation != self.list_generation {
            debug!(?ticket, current = self.list_generation, "Dropping load-more for a replaced list");
            return Completion::Stale;
        }

        match result {
            Ok(coins) => {
                info!(page = ticket.page, count = coins.len(), "Appending page");
                self.append(coins);
                self.page = ticket.page;
                Completion::Applied
            }
            Err(err) => {
                warn!(error = %err, page = ticket.page, "Failed to load more coins");
                self.notifications
                    .push(Notification::error("Failed to load more coins"));
                Completion::Failed
            }
        }
    }

    // A record whose id is already listed supersedes the older snapshot in
    // place instead of being appended twice.
    fn append(&mut self, coins: Vec<Coin>) {
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(self.coins.len());
        for (index, coin) in self.coins.iter().enumerate() {
            positions.entry(coin.id.clone()).or_insert(index);
        }

        for coin in coins {
            match positions.get(&coin.id) {
                Some(&index) => self.coins[index] = coin,
                None => {
                    positions.insert(coin.id.clone(), self.coins.len());
                    self.coins.push(coin);
                }
            }
        }
    }

    /// Flips membership of `id`, persists the whole set and returns the new
    /// membership.
    pub fn toggle_watchlist(&mut self, id: &str) -> bool {
        let added = if self.watchlist.remove(id) {
            false
        } else {
            self.watchlist.insert(id.to_string());
            true
        };

        if let Err(err) = persist_watchlist(&mut self.store, &self.watchlist) {
            warn!(error = %err, "Failed to persist watchlist");
        }

        self.notifications.push(if added {
            Notification::info("Added to watchlist", "Coin added to your watchlist")
        } else {
            Notification::info("Removed from watchlist", "Coin removed from your watchlist")
        });
        added
    }

    pub fn view(&self) -> Vec<&Coin> {
        derive_view(&self.coins, &self.search, self.sort)
    }

    pub fn render(&self) -> DashboardView<'_> {
        if self.has_error && self.coins.is_empty() {
            return DashboardView::Failure;
        }
        if self.refreshing && self.coins.is_empty() {
            return DashboardView::Loading {
                placeholders: PLACEHOLDER_CARDS,
            };
        }

        let view = self.view();
        if view.is_empty() {
            return DashboardView::Empty;
        }

        let cards = view
            .into_iter()
            .map(|coin| CoinCard::new(coin, self.list_currency, self.is_watchlisted(&coin.id)))
            .collect();
        let load_more = self.search.is_empty().then_some(LoadMore {
            busy: self.loading_more,
        });

        DashboardView::Coins { cards, load_more }
    }

    async fn run<C>(&mut self, source: &C, ticket: FetchTicket) -> Completion
    where
        C: CoinSource + ?Sized,
    {
        let result = source
            .fetch_coins(ticket.currency, ticket.page, PAGE_SIZE)
            .await;
        self.complete(ticket, result)
    }

    /// Runs the first load if one is needed.
    pub async fn start<C>(&mut self, source: &C) -> Option<Completion>
    where
        C: CoinSource + ?Sized,
    {
        let ticket = self.begin_startup()?;
        Some(self.run(source, ticket).await)
    }

    pub async fn change_currency<C>(&mut self, source: &C, currency: Currency) -> Option<Completion>
    where
        C: CoinSource + ?Sized,
    {
        let ticket = self.begin_currency_change(currency)?;
        Some(self.run(source, ticket).await)
    }

    pub async fn refresh<C>(&mut self, source: &C) -> Completion
    where
        C: CoinSource + ?Sized,
    {
        let ticket = self.begin_refresh();
        self.run(source, ticket).await
    }

    pub async fn load_more<C>(&mut self, source: &C) -> Option<Completion>
    where
        C: CoinSource + ?Sized,
    {
        let ticket = self.begin_load_more()?;
        Some(self.run(source, ticket).await)
    }
}
