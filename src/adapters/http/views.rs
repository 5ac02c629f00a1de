//! HTML pages
//!
//! Every interpolated value goes through [`escape`].

use std::borrow::Cow;

use axum::response::Html;

use crate::{
    commands::Summary,
    domain::{Club, Competition, DATE_FORMAT, MAX_PLACES_PER_BOOKING},
};

fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | GUDLFT</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title)
    ))
}

fn messages(messages: &[&str]) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let items: String = messages
        .iter()
        .map(|message| format!("<li>{}</li>\n", escape(message)))
        .collect();
    format!("<ul class=\"messages\">\n{items}</ul>\n")
}

pub fn index(flash: &[&str]) -> Html<String> {
    let body = format!(
        "<h1>Welcome to the GUDLFT Registration Portal!</h1>\n\
         {}\
         <p>Please enter your secretary email to continue:</p>\n\
         <form action=\"/show-summary\" method=\"post\">\n\
         <label for=\"email\">Email:</label>\n\
         <input type=\"email\" name=\"email\" id=\"email\">\n\
         <button type=\"submit\">Enter</button>\n\
         </form>\n\
         <p><a href=\"/points-board\">See the clubs' points</a></p>\n",
        messages(flash)
    );
    page("Registration", &body)
}

pub fn email_not_found() -> Html<String> {
    page(
        "Email not found",
        "<h1>Sorry, that email wasn't found.</h1>\n<p><a href=\"/\">Try again</a></p>\n",
    )
}

pub fn welcome(summary: &Summary, flash: &[&str]) -> Html<String> {
    let club = &summary.club;
    let competitions: String = summary
        .competitions
        .iter()
        .map(|competition| {
            let link = if competition.remaining_places > 0 {
                format!(
                    "<a href=\"{}\">Book places</a>\n",
                    escape(&booking_path(competition, club))
                )
            } else {
                String::new()
            };
            format!(
                "<li>\n{}<br>\nDate: {}<br>\nNumber of places: {}\n{link}</li>\n",
                escape(&competition.name),
                competition.date.format(DATE_FORMAT),
                competition.remaining_places
            )
        })
        .collect();
    let body = format!(
        "<h2>Welcome, {}</h2>\n<a href=\"/logout\">Logout</a>\n{}\
         <p>Points available: {}</p>\n<h3>Competitions:</h3>\n<ul>\n{competitions}</ul>\n\
         <h3>Clubs:</h3>\n{}",
        escape(&club.email),
        messages(flash),
        club.points,
        clubs_table(&summary.clubs)
    );

    page("Summary", &body)
}

pub fn booking(club: &Club, competition: &Competition) -> Html<String> {
    let body = format!(
        "<h2>{competition_name}</h2>\n\
         <p>Places available: {remaining}</p>\n\
         <form action=\"/purchase-places\" method=\"post\">\n\
         <input type=\"hidden\" name=\"club\" value=\"{club_name}\">\n\
         <input type=\"hidden\" name=\"competition\" value=\"{competition_name}\">\n\
         <label for=\"places\">How many places?</label>\n\
         <input type=\"number\" name=\"places\" id=\"places\" min=\"1\" max=\"{max}\">\n\
         <button type=\"submit\">Book</button>\n\
         </form>\n",
        competition_name = escape(&competition.name),
        remaining = competition.remaining_places,
        club_name = escape(&club.name),
        max = MAX_PLACES_PER_BOOKING.min(competition.remaining_places),
    );
    page(&format!("Booking for {}", competition.name), &body)
}

pub fn points_board(clubs: &[Club]) -> Html<String> {
    let body = format!(
        "<h1>Clubs' points</h1>\n{}<p><a href=\"/\">Back</a></p>\n",
        clubs_table(clubs)
    );
    page("Points", &body)
}

fn clubs_table(clubs: &[Club]) -> String {
    let rows: String = clubs
        .iter()
        .map(|club| {
            format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape(&club.name),
                club.points
            )
        })
        .collect();
    format!("<table>\n<tr><th>Club</th><th>Points</th></tr>\n{rows}</table>\n")
}

pub fn server_error() -> Html<String> {
    page(
        "Error",
        "<h1>Something went wrong.</h1>\n<p><a href=\"/\">Back to the home page</a></p>\n",
    )
}

fn booking_path(competition: &Competition, club: &Club) -> String {
    format!(
        "/book/{}/{}",
        urlencoding::encode(&competition.name),
        urlencoding::encode(&club.name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use speculoos::prelude::*;

    fn club() -> Club {
        Club {
            name: "Ham & Eggs".to_string(),
            email: "<script>@example.com".to_string(),
            points: 13,
        }
    }

    fn competition(remaining_places: u32) -> Competition {
        Competition {
            name: "Spring Festival".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 3, 27)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            remaining_places,
        }
    }

    #[test]
    fn test_escape() {
        assert_that!(escape("plain").as_ref()).is_equal_to("plain");
        assert_that!(escape("<a href=\"x\">Tom & Jerry's</a>").as_ref())
            .is_equal_to("&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
    }

    #[test]
    fn test_welcome() {
        let other = Club {
            name: "Iron Temple".to_string(),
            email: "admin@irontemple.com".to_string(),
            points: 4,
        };
        let summary = Summary {
            club: club(),
            clubs: vec![club(), other],
            competitions: vec![competition(25), competition(0)],
        };

        let Html(html) = welcome(&summary, &["Great-booking complete!"]);

        assert_that!(html).contains("Welcome, &lt;script&gt;@example.com");
        assert_that!(html).contains("Points available: 13");
        assert_that!(html).contains("<li>Great-booking complete!</li>");
        assert_that!(html).contains("Date: 2030-03-27 10:00:00");
        // Only the competition with places left can be booked
        assert_that!(html.matches("Book places").count()).is_equal_to(1);
        assert_that!(html).contains("/book/Spring%20Festival/Ham%20%26%20Eggs");
        // Every club is listed with its points
        assert_that!(html).contains("<tr><td>Ham &amp; Eggs</td><td>13</td></tr>");
        assert_that!(html).contains("<tr><td>Iron Temple</td><td>4</td></tr>");
    }

    #[test]
    fn test_booking_caps_places_input() {
        let Html(html) = booking(&club(), &competition(5));

        assert_that!(html).contains("max=\"5\"");
        assert_that!(html).contains("value=\"Ham &amp; Eggs\"");

        let Html(html) = booking(&club(), &competition(25));
        assert_that!(html).contains("max=\"12\"");
    }

    #[test]
    fn test_points_board() {
        let Html(html) = points_board(&[club()]);

        assert_that!(html).contains("<tr><td>Ham &amp; Eggs</td><td>13</td></tr>");
    }
}
