use std::sync::Arc;

use crate::{
    domain::{Club, Competition},
    ports::{clock::ClockPort, database::DatabasePort},
};

pub mod book;
pub mod points_board;
pub mod purchase_places;
pub mod show_summary;

pub struct DomainLogic<D, C> {
    database: Arc<D>,
    clock: Arc<C>,
}

impl<D, C> DomainLogic<D, C>
where
    D: DatabasePort,
    C: ClockPort,
{
    pub fn new(database: Arc<D>, clock: Arc<C>) -> Self {
        Self { database, clock }
    }
}

// Implemented by hand so that `D` and `C` don't need to be `Clone`
impl<D, C> Clone for DomainLogic<D, C> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            clock: self.clock.clone(),
        }
    }
}

/// Everything shown on a club's welcome page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    /// The club currently using the application
    pub club: Club,
    pub clubs: Vec<Club>,
    pub competitions: Vec<Competition>,
}

impl Summary {
    async fn fetch<D: DatabasePort>(database: &D, club: Club) -> Result<Self, Error> {
        Ok(Self {
            club,
            clubs: database.list_clubs().await?,
            competitions: database.list_competitions().await?,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("database port error: {0:?}")]
    Database(#[from] crate::ports::database::Error),

    #[error("no club registered with email {0:?}")]
    ClubEmailNotFound(String),
    #[error("club {0:?} not found")]
    ClubNotFound(String),
}
