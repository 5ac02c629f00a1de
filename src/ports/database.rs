use crate::domain::{Club, Competition, Shortfall};

/// Access to the clubs and competitions
///
/// Lookups are by exact match. When several records share a key, the first one in source order
/// is returned.
#[mockall::automock]
#[async_trait::async_trait]
pub trait DatabasePort: Send + Sync {
    async fn list_clubs(&self) -> Result<Vec<Club>, Error>;
    async fn list_competitions(&self) -> Result<Vec<Competition>, Error>;
    async fn find_club_by_email(&self, email: &str) -> Result<Option<Club>, Error>;
    async fn find_club_by_name(&self, name: &str) -> Result<Option<Club>, Error>;
    async fn find_competition_by_name(&self, name: &str) -> Result<Option<Competition>, Error>;

    /// Move `places` from the club's points to the competition
    ///
    /// Returns the updated club and competition. Balances are checked again against the stored
    /// values, so this fails instead of going negative when another purchase got there first.
    async fn register_purchase(
        &self,
        club_name: &str,
        competition_name: &str,
        places: u32,
    ) -> Result<(Club, Competition), Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("club {0:?} does not exist")]
    ClubDoesNotExist(String),

    #[error("competition {0:?} does not exist")]
    CompetitionDoesNotExist(String),

    /// Applying the purchase would make the points or the remaining places negative
    #[error("cannot apply purchase: {0}")]
    Shortfall(#[from] Shortfall),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as a poisoned lock.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
