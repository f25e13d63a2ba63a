//! SQL query builder for hotel searches.
//!
//! Renders a [`HotelPredicate`] into a `WHERE` fragment over the `hotels`
//! table with positional bind values, then appends ordering and the page
//! window. Values are always bound, never interpolated; only the page window
//! (already validated integers) is written into the SQL text.

use staybook_search::{Clause, HotelPredicate, PageWindow, SortField, SortKey};

mod bind;

use bind::{push_text, push_text_array};

/// Column list shared by every hotel query. Expects the table alias `h`.
pub(crate) const HOTEL_COLUMNS: &str = "h.id, h.user_id, h.name, h.city, h.country, \
     h.description, h.type AS hotel_type, h.adult_count, h.child_count, h.facilities, \
     h.price_per_night, h.star_rating, h.image_urls, h.last_updated";

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    TextArray(Vec<String>),
}

/// A hotel search ready to be rendered.
#[derive(Debug, Clone)]
pub struct HotelSearchQuery<'a> {
    predicate: &'a HotelPredicate,
    sort: Option<SortKey>,
    skip: i64,
    limit: i64,
}

impl<'a> HotelSearchQuery<'a> {
    /// `skip` must already be validated as non-negative.
    pub fn new(
        predicate: &'a HotelPredicate,
        sort: Option<SortKey>,
        window: PageWindow,
        skip: i64,
    ) -> Self {
        Self {
            predicate,
            sort,
            skip,
            limit: window.limit(),
        }
    }

    pub fn build_sql(&self) -> (String, Vec<BindValue>) {
        let mut sql = format!("SELECT {HOTEL_COLUMNS} FROM hotels h WHERE TRUE");
        let mut bind_params = Vec::new();

        for clause in self.predicate.clauses() {
            sql.push_str(" AND ");
            sql.push_str(&build_clause(clause, &mut bind_params));
        }

        push_order_by(&mut sql, self.sort);

        sql.push_str(&format!(" LIMIT {} OFFSET {}", self.limit, self.skip));

        (sql, bind_params)
    }
}

fn build_clause(clause: &Clause, bind_params: &mut Vec<BindValue>) -> String {
    match clause {
        Clause::Destination(text) => {
            let idx = push_text(bind_params, format!("%{}%", escape_like_pattern(text)));
            format!(
                "(h.city ILIKE ${idx} ESCAPE E'\\\\' OR h.country ILIKE ${idx} ESCAPE E'\\\\')"
            )
        }
        Clause::MinAdults(min) => {
            let idx = push_text(bind_params, min.to_string());
            format!("h.adult_count >= ${idx}::int4")
        }
        Clause::MinChildren(min) => {
            let idx = push_text(bind_params, min.to_string());
            format!("h.child_count >= ${idx}::int4")
        }
        Clause::AllFacilities(facilities) => {
            let idx = push_text_array(bind_params, facilities.clone());
            format!("h.facilities @> ${idx}::text[]")
        }
        Clause::TypeIn(types) => {
            let idx = push_text_array(bind_params, types.clone());
            format!("h.type = ANY(${idx}::text[])")
        }
        Clause::StarRatingIn(stars) => {
            let idx = push_text_array(bind_params, stars.iter().map(|s| s.to_string()).collect());
            format!("h.star_rating = ANY(${idx}::text[]::int4[])")
        }
        Clause::MaxPrice(max) => {
            let idx = push_text(bind_params, max.to_string());
            format!("h.price_per_night <= ${idx}::numeric")
        }
    }
}

fn push_order_by(sql: &mut String, sort: Option<SortKey>) {
    // `seq` is the insertion sequence: the natural order and the tie-breaker.
    match sort {
        Some(key) => {
            let column = match key.field {
                SortField::StarRating => "h.star_rating",
                SortField::PricePerNight => "h.price_per_night",
            };
            let direction = if key.ascending { "ASC" } else { "DESC" };
            sql.push_str(&format!(" ORDER BY {column} {direction}, h.seq ASC"));
        }
        None => sql.push_str(" ORDER BY h.seq ASC"),
    }
}

fn escape_like_pattern(s: &str) -> String {
    // Escape SQL LIKE meta-characters so user input is treated literally.
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use staybook_search::{SearchFilter, SortOption};

    fn render(filter: &SearchFilter, sort: Option<SortOption>, page: i64) -> (String, Vec<BindValue>) {
        let predicate = HotelPredicate::from_filter(filter);
        let window = PageWindow::new(Some(page));
        HotelSearchQuery::new(&predicate, sort.map(SortOption::key), window, window.skip())
            .build_sql()
    }

    #[test]
    fn unconstrained_search_has_no_clauses() {
        let (sql, binds) = render(&SearchFilter::default(), None, 1);
        assert!(sql.ends_with("WHERE TRUE ORDER BY h.seq ASC LIMIT 5 OFFSET 0"), "{sql}");
        assert!(binds.is_empty());
    }

    #[test]
    fn destination_is_bound_once_and_escaped() {
        let filter = SearchFilter {
            destination: Some("50%_off".into()),
            ..Default::default()
        };
        let (sql, binds) = render(&filter, None, 1);
        assert!(sql.contains("h.city ILIKE $1 ESCAPE E'\\\\' OR h.country ILIKE $1"), "{sql}");
        assert_eq!(binds, vec![BindValue::Text("%50\\%\\_off%".into())]);
    }

    #[test]
    fn clauses_number_their_binds_in_order() {
        let filter = SearchFilter {
            adult_count: Some(2),
            facilities: vec!["wifi".into(), "pool".into()],
            stars: vec![4, 5],
            max_price: Some(Decimal::new(1995, 1)),
            ..Default::default()
        };
        let (sql, binds) = render(&filter, None, 1);
        assert!(sql.contains(
            "AND h.adult_count >= $1::int4 AND h.facilities @> $2::text[] \
             AND h.star_rating = ANY($3::text[]::int4[]) AND h.price_per_night <= $4::numeric"
        ), "{sql}");
        assert_eq!(
            binds,
            vec![
                BindValue::Text("2".into()),
                BindValue::TextArray(vec!["wifi".into(), "pool".into()]),
                BindValue::TextArray(vec!["4".into(), "5".into()]),
                BindValue::Text("199.5".into()),
            ]
        );
    }

    #[test]
    fn sort_keys_break_ties_by_insertion() {
        let (sql, _) = render(&SearchFilter::default(), Some(SortOption::PricePerNightDesc), 1);
        assert!(sql.contains("ORDER BY h.price_per_night DESC, h.seq ASC"), "{sql}");

        let (sql, _) = render(&SearchFilter::default(), Some(SortOption::StarRating), 1);
        assert!(sql.contains("ORDER BY h.star_rating DESC, h.seq ASC"), "{sql}");
    }

    #[test]
    fn later_pages_offset_by_page_size() {
        let (sql, _) = render(&SearchFilter::default(), None, 3);
        assert!(sql.ends_with("LIMIT 5 OFFSET 10"), "{sql}");
    }

    #[test]
    fn type_membership_uses_any() {
        let filter = SearchFilter {
            types: vec!["Budget".into(), "Luxury".into()],
            ..Default::default()
        };
        let (sql, _) = render(&filter, None, 1);
        assert!(sql.contains("h.type = ANY($1::text[])"), "{sql}");
    }
}
