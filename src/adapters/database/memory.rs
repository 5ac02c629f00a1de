use crate::{
    domain::{apply_purchase, Club, Competition},
    ports::database::{DatabasePort, Error},
};
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory store for clubs and competitions
///
/// Cloning is cheap and every clone shares the same records. All reads and the purchase update
/// go through a single lock, so a purchase sees the balances left by the previous one.
#[derive(Clone, Debug, Default)]
pub struct MemoryDatabase {
    records: Arc<Mutex<Records>>,
}

#[derive(Debug, Default)]
struct Records {
    clubs: Vec<Club>,
    competitions: Vec<Competition>,
}

impl MemoryDatabase {
    /// Create a store from already validated records
    ///
    /// Duplicate names or emails are not checked here: lookups return the first match.
    pub fn new(clubs: Vec<Club>, competitions: Vec<Competition>) -> Self {
        Self {
            records: Arc::new(Mutex::new(Records {
                clubs,
                competitions,
            })),
        }
    }
}

#[async_trait::async_trait]
impl DatabasePort for MemoryDatabase {
    async fn list_clubs(&self) -> Result<Vec<Club>, Error> {
        Ok(self.records.lock()?.clubs.clone())
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>, Error> {
        Ok(self.records.lock()?.competitions.clone())
    }

    async fn find_club_by_email(&self, email: &str) -> Result<Option<Club>, Error> {
        let club = self
            .records
            .lock()?
            .clubs
            .iter()
            .find(|club| club.email == email)
            .cloned();

        Ok(club)
    }

    async fn find_club_by_name(&self, name: &str) -> Result<Option<Club>, Error> {
        let club = self
            .records
            .lock()?
            .clubs
            .iter()
            .find(|club| club.name == name)
            .cloned();

        Ok(club)
    }

    async fn find_competition_by_name(&self, name: &str) -> Result<Option<Competition>, Error> {
        let competition = self
            .records
            .lock()?
            .competitions
            .iter()
            .find(|competition| competition.name == name)
            .cloned();

        Ok(competition)
    }

    async fn register_purchase(
        &self,
        club_name: &str,
        competition_name: &str,
        places: u32,
    ) -> Result<(Club, Competition), Error> {
        let mut records = self.records.lock()?;
        let Records {
            clubs,
            competitions,
        } = &mut *records;

        let club = clubs
            .iter_mut()
            .find(|club| club.name == club_name)
            .ok_or_else(|| Error::ClubDoesNotExist(club_name.to_string()))?;
        let competition = competitions
            .iter_mut()
            .find(|competition| competition.name == competition_name)
            .ok_or_else(|| Error::CompetitionDoesNotExist(competition_name.to_string()))?;

        apply_purchase(club, competition, places)?;

        Ok((club.clone(), competition.clone()))
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
