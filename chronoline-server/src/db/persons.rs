//! Person record queries
//!
//! Read paths build their SQL dynamically from the active filters, always
//! with bound parameters. Writes happen only through the seeding helpers.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

/// Person row, serialized to the wire with camelCase field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRow {
    pub id: String,
    pub name: String,
    pub birth_year: i32,
    pub death_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reign_start: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reign_end: Option<i32>,
    pub category: String,
    pub country: String,
    pub description: String,
    pub achievements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement_year_1: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement_year_2: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement_year_3: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PersonRow {
    fn from_row(row: &Row) -> Result<Self, rusqlite::Error> {
        let achievements_json: String = row.get("achievements")?;

        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            birth_year: row.get("birth_year")?,
            death_year: row.get("death_year")?,
            reign_start: row.get("reign_start")?,
            reign_end: row.get("reign_end")?,
            category: row.get("category")?,
            country: row.get("country")?,
            description: row.get("description")?,
            achievements: serde_json::from_str(&achievements_json).unwrap_or_default(),
            achievement_year_1: row.get("achievement_year_1")?,
            achievement_year_2: row.get("achievement_year_2")?,
            achievement_year_3: row.get("achievement_year_3")?,
            image_url: row.get("image_url")?,
        })
    }
}

/// Input for inserting a person record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonInput {
    pub id: String,
    pub name: String,
    pub birth_year: i32,
    pub death_year: i32,
    #[serde(default)]
    pub reign_start: Option<i32>,
    #[serde(default)]
    pub reign_end: Option<i32>,
    pub category: String,
    pub country: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub achievement_year_1: Option<i32>,
    #[serde(default)]
    pub achievement_year_2: Option<i32>,
    #[serde(default)]
    pub achievement_year_3: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CreatePersonInput {
    /// Check the record invariants: the life interval is ordered, and any
    /// reign interval is ordered and contained within it.
    fn validate(&self) -> Result<(), ApiError> {
        if self.birth_year > self.death_year {
            return Err(ApiError::BadRequest(format!(
                "{}: birth_year {} after death_year {}",
                self.id, self.birth_year, self.death_year
            )));
        }

        if let (Some(start), Some(end)) = (self.reign_start, self.reign_end) {
            if !(self.birth_year <= start && start <= end && end <= self.death_year) {
                return Err(ApiError::BadRequest(format!(
                    "{}: reign {}..{} outside life {}..{}",
                    self.id, start, end, self.birth_year, self.death_year
                )));
            }
        }

        Ok(())
    }

    fn country_tokens(&self) -> Vec<&str> {
        self.country
            .split('/')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Filter parameters for listing persons
#[derive(Debug, Clone, Default)]
pub struct PersonQuery {
    pub categories: Vec<String>,
    pub countries: Vec<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

/// List persons matching all active filters, ordered by birth year.
///
/// The time filter is interval overlap: a record passes when
/// `death_year >= start_year` and `birth_year <= end_year`.
pub fn list_persons(conn: &Connection, query: &PersonQuery) -> Result<Vec<PersonRow>, ApiError> {
    let mut sql = String::from("SELECT p.* FROM persons p");
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![];
    let mut conditions = vec![];

    if !query.categories.is_empty() {
        let placeholders: Vec<_> = query.categories.iter().map(|_| "?").collect();
        conditions.push(format!("p.category IN ({})", placeholders.join(", ")));
        for category in &query.categories {
            params.push(Box::new(category.clone()));
        }
    }

    if !query.countries.is_empty() {
        let placeholders: Vec<_> = query.countries.iter().map(|_| "?").collect();
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM person_countries pc \
             WHERE pc.person_id = p.id AND pc.country IN ({}))",
            placeholders.join(", ")
        ));
        for country in &query.countries {
            params.push(Box::new(country.clone()));
        }
    }

    if let Some(start) = query.start_year {
        conditions.push("p.death_year >= ?".to_string());
        params.push(Box::new(start));
    }

    if let Some(end) = query.end_year {
        conditions.push("p.birth_year <= ?".to_string());
        params.push(Box::new(end));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    sql.push_str(" ORDER BY p.birth_year ASC");

    debug!("Executing query: {}", sql);

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ApiError::Database(format!("Prepare failed: {}", e)))?;

    let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

    let rows = stmt
        .query_map(param_refs.as_slice(), |row| PersonRow::from_row(row))
        .map_err(|e| ApiError::Database(format!("Query failed: {}", e)))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::Database(format!("Row parse failed: {}", e)))
}

/// Get one person by id
pub fn get_person(conn: &Connection, id: &str) -> Result<Option<PersonRow>, ApiError> {
    let mut stmt = conn
        .prepare("SELECT * FROM persons WHERE id = ?")
        .map_err(|e| ApiError::Database(format!("Prepare failed: {}", e)))?;

    let mut rows = stmt
        .query(params![id])
        .map_err(|e| ApiError::Database(format!("Query failed: {}", e)))?;

    match rows
        .next()
        .map_err(|e| ApiError::Database(format!("Row fetch failed: {}", e)))?
    {
        Some(row) => {
            let person = PersonRow::from_row(row)
                .map_err(|e| ApiError::Database(format!("Row parse failed: {}", e)))?;
            Ok(Some(person))
        }
        None => Ok(None),
    }
}

/// Distinct category labels, alphabetical
pub fn list_categories(conn: &Connection) -> Result<Vec<String>, ApiError> {
    collect_strings(conn, "SELECT DISTINCT category FROM persons ORDER BY category")
}

/// Distinct individual country names, alphabetical. Composite `a/b` values
/// contribute each token separately via the person_countries index.
pub fn list_countries(conn: &Connection) -> Result<Vec<String>, ApiError> {
    collect_strings(
        conn,
        "SELECT DISTINCT country FROM person_countries ORDER BY country",
    )
}

fn collect_strings(conn: &Connection, sql: &str) -> Result<Vec<String>, ApiError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ApiError::Database(format!("Prepare failed: {}", e)))?;

    let rows = stmt
        .query_map([], |row| row.get(0))
        .map_err(|e| ApiError::Database(format!("Query failed: {}", e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::Database(format!("Row parse failed: {}", e)));
    rows
}

/// Dataset overview plus per-category and per-country counts.
///
/// Countries here group by the raw stored value, so a composite like
/// `Italy/France` counts as its own entry; `/api/countries` is the
/// token-level view.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub overview: Overview,
    pub categories: Vec<CategoryCount>,
    pub countries: Vec<CountryCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_persons: i64,
    pub earliest_birth: Option<i64>,
    pub latest_death: Option<i64>,
    pub unique_categories: i64,
    pub unique_countries: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: i64,
}

/// Collect dataset statistics
pub fn stats(conn: &Connection) -> Result<Stats, ApiError> {
    let overview = conn
        .query_row(
            "SELECT COUNT(*), MIN(birth_year), MAX(death_year), \
             COUNT(DISTINCT category), COUNT(DISTINCT country) FROM persons",
            [],
            |row| {
                Ok(Overview {
                    total_persons: row.get(0)?,
                    earliest_birth: row.get(1)?,
                    latest_death: row.get(2)?,
                    unique_categories: row.get(3)?,
                    unique_countries: row.get(4)?,
                })
            },
        )
        .map_err(|e| ApiError::Database(format!("Stats query failed: {}", e)))?;

    let mut stmt = conn
        .prepare(
            "SELECT category, COUNT(*) as count FROM persons \
             GROUP BY category ORDER BY count DESC",
        )
        .map_err(|e| ApiError::Database(format!("Prepare failed: {}", e)))?;
    let categories = stmt
        .query_map([], |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                count: row.get(1)?,
            })
        })
        .map_err(|e| ApiError::Database(format!("Query failed: {}", e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::Database(format!("Row parse failed: {}", e)))?;

    let mut stmt = conn
        .prepare(
            "SELECT country, COUNT(*) as count FROM persons \
             GROUP BY country ORDER BY count DESC",
        )
        .map_err(|e| ApiError::Database(format!("Prepare failed: {}", e)))?;
    let countries = stmt
        .query_map([], |row| {
            Ok(CountryCount {
                country: row.get(0)?,
                count: row.get(1)?,
            })
        })
        .map_err(|e| ApiError::Database(format!("Query failed: {}", e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::Database(format!("Row parse failed: {}", e)))?;

    Ok(Stats {
        overview,
        categories,
        countries,
    })
}

/// Insert one person and its country tokens in a transaction
pub fn create_person(
    conn: &mut Connection,
    input: CreatePersonInput,
) -> Result<PersonRow, ApiError> {
    input.validate()?;

    let tx = conn
        .transaction()
        .map_err(|e| ApiError::Database(format!("Transaction failed: {}", e)))?;

    insert_person(&tx, &input)?;

    tx.commit()
        .map_err(|e| ApiError::Database(format!("Commit failed: {}", e)))?;

    get_person(conn, &input.id)?
        .ok_or_else(|| ApiError::Internal("Person not found after insert".to_string()))
}

fn insert_person(tx: &rusqlite::Transaction, input: &CreatePersonInput) -> Result<(), ApiError> {
    let achievements_json = serde_json::to_string(&input.achievements)
        .map_err(|e| ApiError::Internal(format!("Achievements encode failed: {}", e)))?;

    tx.execute(
        r#"
        INSERT INTO persons (
            id, name, birth_year, death_year, reign_start, reign_end,
            category, country, description, achievements,
            achievement_year_1, achievement_year_2, achievement_year_3, image_url
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            input.id,
            input.name,
            input.birth_year,
            input.death_year,
            input.reign_start,
            input.reign_end,
            input.category,
            input.country,
            input.description,
            achievements_json,
            input.achievement_year_1,
            input.achievement_year_2,
            input.achievement_year_3,
            input.image_url,
        ],
    )
    .map_err(|e| ApiError::Database(format!("Insert failed: {}", e)))?;

    for token in input.country_tokens() {
        tx.execute(
            "INSERT OR IGNORE INTO person_countries (person_id, country) VALUES (?, ?)",
            params![input.id, token],
        )
        .map_err(|e| ApiError::Database(format!("Country token insert failed: {}", e)))?;
    }

    Ok(())
}

/// Result of a bulk seed
#[derive(Debug, Clone, Serialize)]
pub struct BulkResult {
    pub inserted: u64,
    pub skipped: u64,
    pub errors: Vec<String>,
}

/// Bulk insert person records (for seeding). Existing ids are skipped;
/// invalid records are reported without aborting the batch.
pub fn bulk_create(
    conn: &mut Connection,
    items: Vec<CreatePersonInput>,
) -> Result<BulkResult, ApiError> {
    let tx = conn
        .transaction()
        .map_err(|e| ApiError::Database(format!("Transaction failed: {}", e)))?;

    let mut inserted = 0u64;
    let mut skipped = 0u64;
    let mut errors = vec![];

    for input in items {
        let exists: bool = tx
            .query_row(
                "SELECT 1 FROM persons WHERE id = ?",
                params![input.id],
                |_| Ok(true),
            )
            .unwrap_or(false);

        if exists {
            skipped += 1;
            continue;
        }

        if let Err(e) = input.validate() {
            errors.push(e.to_string());
            continue;
        }

        match insert_person(&tx, &input) {
            Ok(()) => inserted += 1,
            Err(e) => errors.push(format!("{}: {}", input.id, e)),
        }
    }

    tx.commit()
        .map_err(|e| ApiError::Database(format!("Commit failed: {}", e)))?;

    Ok(BulkResult {
        inserted,
        skipped,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::init_schema(&conn).unwrap();
        conn
    }

    fn person(id: &str, birth: i32, death: i32, category: &str, country: &str) -> CreatePersonInput {
        CreatePersonInput {
            id: id.to_string(),
            name: id.to_string(),
            birth_year: birth,
            death_year: death,
            reign_start: None,
            reign_end: None,
            category: category.to_string(),
            country: country.to_string(),
            description: String::new(),
            achievements: vec![],
            achievement_year_1: None,
            achievement_year_2: None,
            achievement_year_3: None,
            image_url: None,
        }
    }

    fn seed(conn: &mut Connection) {
        let items = vec![
            person("socrates", -470, -399, "Philosopher", "Greece"),
            person("plato", -428, -348, "Philosopher", "Greece"),
            person("cassini", 1625, 1712, "Scientist", "Italy/France"),
            person("newton", 1643, 1727, "Scientist", "England"),
        ];
        let result = bulk_create(conn, items).unwrap();
        assert_eq!(result.inserted, 4);
    }

    #[test]
    fn lists_in_birth_year_order() {
        let mut conn = test_conn();
        seed(&mut conn);

        let rows = list_persons(&conn, &PersonQuery::default()).unwrap();
        let ids: Vec<_> = rows.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["socrates", "plato", "cassini", "newton"]);
    }

    #[test]
    fn filters_by_category_and_time_window() {
        let mut conn = test_conn();
        seed(&mut conn);

        let query = PersonQuery {
            categories: vec!["Philosopher".to_string()],
            start_year: Some(-500),
            end_year: Some(-420),
            ..Default::default()
        };
        let rows = list_persons(&conn, &query).unwrap();
        // plato's life overlaps -500..-420 at its very start
        let ids: Vec<_> = rows.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["socrates", "plato"]);
    }

    #[test]
    fn composite_country_matches_each_token() {
        let mut conn = test_conn();
        seed(&mut conn);

        for country in ["Italy", "France"] {
            let query = PersonQuery {
                countries: vec![country.to_string()],
                ..Default::default()
            };
            let rows = list_persons(&conn, &query).unwrap();
            assert_eq!(rows.len(), 1, "country {}", country);
            assert_eq!(rows[0].id, "cassini");
        }
    }

    #[test]
    fn distinct_countries_are_token_level() {
        let mut conn = test_conn();
        seed(&mut conn);

        let countries = list_countries(&conn).unwrap();
        assert_eq!(countries, vec!["England", "France", "Greece", "Italy"]);
    }

    #[test]
    fn get_person_returns_none_for_unknown_id() {
        let mut conn = test_conn();
        seed(&mut conn);

        assert!(get_person(&conn, "missing").unwrap().is_none());
        assert_eq!(get_person(&conn, "plato").unwrap().unwrap().name, "plato");
    }

    #[test]
    fn achievements_round_trip_through_json_column() {
        let mut conn = test_conn();
        let mut input = person("curie", 1867, 1934, "Scientist", "Poland/France");
        input.achievements = vec!["Discovered radium".to_string(), "Nobel Prize".to_string()];
        input.achievement_year_1 = Some(1898);
        input.achievement_year_2 = Some(1903);
        create_person(&mut conn, input).unwrap();

        let row = get_person(&conn, "curie").unwrap().unwrap();
        assert_eq!(row.achievements.len(), 2);
        assert_eq!(row.achievement_year_1, Some(1898));
        assert_eq!(row.achievement_year_3, None);
    }

    #[test]
    fn stats_counts_overview_and_groups() {
        let mut conn = test_conn();
        seed(&mut conn);

        let stats = stats(&conn).unwrap();
        assert_eq!(stats.overview.total_persons, 4);
        assert_eq!(stats.overview.earliest_birth, Some(-470));
        assert_eq!(stats.overview.latest_death, Some(1727));
        assert_eq!(stats.overview.unique_categories, 2);
        // Raw column grouping: Italy/France counts as one distinct value
        assert_eq!(stats.overview.unique_countries, 3);
        assert_eq!(stats.categories[0].count, 2);
    }

    #[test]
    fn stats_on_empty_database() {
        let conn = test_conn();
        let stats = stats(&conn).unwrap();
        assert_eq!(stats.overview.total_persons, 0);
        assert_eq!(stats.overview.earliest_birth, None);
        assert_eq!(stats.overview.latest_death, None);
        assert!(stats.categories.is_empty());
    }

    #[test]
    fn rejects_inverted_life_interval() {
        let mut conn = test_conn();
        let input = person("bad", 100, 50, "Ruler", "Rome");
        let err = create_person(&mut conn, input).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn rejects_reign_outside_life() {
        let mut conn = test_conn();
        let mut input = person("augustus", -63, 14, "Ruler", "Rome");
        input.reign_start = Some(-27);
        input.reign_end = Some(20);
        let err = create_person(&mut conn, input).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn bulk_create_skips_existing_and_reports_invalid() {
        let mut conn = test_conn();
        seed(&mut conn);

        let items = vec![
            person("plato", -428, -348, "Philosopher", "Greece"),
            person("kant", 1724, 1804, "Philosopher", "Germany"),
            person("bad", 10, -10, "Ruler", "Rome"),
        ];
        let result = bulk_create(&mut conn, items).unwrap();
        assert_eq!(result.inserted, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.errors.len(), 1);
    }
}
