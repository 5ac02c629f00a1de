use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;

use super::{DomainLogic, Error, Summary};
use crate::{
    domain::{Club, Competition},
    ports::{clock::ClockPort, database::DatabasePort},
};

/// Open the booking form for a club and a competition
pub struct BookRequest {
    pub competition_name: String,
    pub club_name: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum BookResponse {
    /// Both records exist
    Booking { club: Club, competition: Competition },
    /// The club exists but the competition doesn't
    ///
    /// The club is sent back to its welcome page.
    CompetitionNotFound(Summary),
}

impl<D, C> Service<BookRequest> for DomainLogic<D, C>
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    type Response = BookResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: BookRequest) -> Self::Future {
        let database = self.database.clone();
        Box::pin(async move {
            let club = database
                .find_club_by_name(&req.club_name)
                .await?
                .ok_or(Error::ClubNotFound(req.club_name))?;

            match database
                .find_competition_by_name(&req.competition_name)
                .await?
            {
                Some(competition) => Ok(BookResponse::Booking { club, competition }),
                None => {
                    tracing::warn!(
                        club = %club.name,
                        competition = %req.competition_name,
                        "booking requested for an unknown competition"
                    );
                    Ok(BookResponse::CompetitionNotFound(
                        Summary::fetch(database.as_ref(), club).await?,
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::database::memory::MemoryDatabase, ports::clock::MockClockPort};
    use chrono::NaiveDate;
    use rstest::*;
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::{BoxError, ServiceExt};

    #[fixture]
    fn club() -> Club {
        Club {
            name: "Simply Lift".to_string(),
            email: "john@simplylift.co".to_string(),
            points: 13,
        }
    }

    #[fixture]
    fn competition() -> Competition {
        Competition {
            name: "Spring Festival".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 3, 27)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            remaining_places: 25,
        }
    }

    #[fixture]
    fn domain(club: Club, competition: Competition) -> DomainLogic<MemoryDatabase, MockClockPort> {
        DomainLogic::new(
            Arc::new(MemoryDatabase::new(vec![club], vec![competition])),
            Arc::new(MockClockPort::new()),
        )
    }

    fn request(competition_name: &str, club_name: &str) -> BookRequest {
        BookRequest {
            competition_name: competition_name.to_string(),
            club_name: club_name.to_string(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_call(
        domain: DomainLogic<MemoryDatabase, MockClockPort>,
        club: Club,
        competition: Competition,
    ) -> Result<(), BoxError> {
        let res = domain.oneshot(request("Spring Festival", "Simply Lift")).await;

        assert_that!(res)
            .is_ok()
            .is_equal_to(BookResponse::Booking { club, competition });

        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_competition_not_found(
        domain: DomainLogic<MemoryDatabase, MockClockPort>,
        club: Club,
        competition: Competition,
    ) -> Result<(), BoxError> {
        let res = domain.oneshot(request("Badass Tournament", "Simply Lift")).await;

        assert_that!(res)
            .is_ok()
            .is_equal_to(BookResponse::CompetitionNotFound(Summary {
                club: club.clone(),
                clubs: vec![club],
                competitions: vec![competition],
            }));

        Ok(())
    }

    #[rstest]
    #[case("Spring Festival")]
    // A missing club takes precedence over a missing competition
    #[case("Badass Tournament")]
    #[tokio::test]
    async fn test_club_not_found(
        domain: DomainLogic<MemoryDatabase, MockClockPort>,
        #[case] competition_name: &str,
    ) -> Result<(), BoxError> {
        let res = domain.oneshot(request(competition_name, "Invisible Club")).await;

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::ClubNotFound(name) if name == "Invisible Club"));

        Ok(())
    }
}
