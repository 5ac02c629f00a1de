use std::borrow::Cow;

use chrono::NaiveDateTime;

/// Format used for competition dates, both on disk and when displayed
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Maximum number of places a club can take in a single purchase
pub const MAX_PLACES_PER_BOOKING: u32 = 12;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Club {
    /// Display name, also used as the lookup key when booking
    pub name: String,
    /// Login key for the summary page
    pub email: String,
    /// Spendable balance
    ///
    /// One point buys one place in a competition.
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Competition {
    pub name: String,
    /// Start of the competition
    ///
    /// Places can only be bought strictly before this instant.
    pub date: NaiveDateTime,
    pub remaining_places: u32,
}

impl Competition {
    pub fn has_taken_place(&self, now: NaiveDateTime) -> bool {
        now >= self.date
    }
}

/// Reason a purchase was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The competition already started
    CompetitionOver { date: NaiveDateTime },
    /// The club cannot afford the requested places
    InsufficientPoints,
    /// More than [`MAX_PLACES_PER_BOOKING`] places were requested
    ExceedsBookingLimit,
    /// The competition does not have enough places left
    ExceedsCapacity,
}

impl Rejection {
    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Rejection::CompetitionOver { date } => format!(
                "The competition has already taken place on this date: {}.",
                date.format(DATE_FORMAT)
            )
            .into(),
            Rejection::InsufficientPoints => {
                "Sorry, you can't take more places than you have points.".into()
            }
            Rejection::ExceedsBookingLimit => format!(
                "Sorry, you can't take more than {MAX_PLACES_PER_BOOKING} places."
            )
            .into(),
            Rejection::ExceedsCapacity => {
                "Sorry, you can't take more places than are available.".into()
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Approved,
    Rejected(Rejection),
}

impl PurchaseOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, PurchaseOutcome::Approved)
    }

    /// Status message shown to the club after the purchase attempt
    pub fn message(&self) -> Cow<'static, str> {
        match self {
            PurchaseOutcome::Approved => "Great-booking complete!".into(),
            PurchaseOutcome::Rejected(rejection) => rejection.message(),
        }
    }
}

/// Decide whether `club` may buy `places` in `competition` at `now`
///
/// Rules are checked in a fixed order and the first failing one is reported.
pub fn validate_purchase(
    club: &Club,
    competition: &Competition,
    places: u32,
    now: NaiveDateTime,
) -> PurchaseOutcome {
    let rejection = if competition.has_taken_place(now) {
        Rejection::CompetitionOver {
            date: competition.date,
        }
    } else if club.points < places {
        Rejection::InsufficientPoints
    } else if places > MAX_PLACES_PER_BOOKING {
        Rejection::ExceedsBookingLimit
    } else if places > competition.remaining_places {
        Rejection::ExceedsCapacity
    } else {
        return PurchaseOutcome::Approved;
    };

    PurchaseOutcome::Rejected(rejection)
}

/// Applying a purchase would make a balance negative
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Shortfall {
    #[error("club has {available} point(s), {requested} requested")]
    Points { available: u32, requested: u32 },
    #[error("competition has {available} place(s) left, {requested} requested")]
    Places { available: u32, requested: u32 },
}

/// Deduct `places` from both the club's points and the competition's remaining places
///
/// Callers are expected to have an [`PurchaseOutcome::Approved`] for these values. If either
/// balance is too low, nothing is modified. This is not idempotent: every call deducts again.
pub fn apply_purchase(
    club: &mut Club,
    competition: &mut Competition,
    places: u32,
) -> Result<(), Shortfall> {
    let points = club.points.checked_sub(places).ok_or(Shortfall::Points {
        available: club.points,
        requested: places,
    })?;
    let remaining_places =
        competition
            .remaining_places
            .checked_sub(places)
            .ok_or(Shortfall::Places {
                available: competition.remaining_places,
                requested: places,
            })?;

    club.points = points;
    competition.remaining_places = remaining_places;
    Ok(())
}
