use crate::models::{Company, NewCompany, Portfolio};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};
use uuid::Uuid;

fn row_to_company(row: &Row) -> rusqlite::Result<Company> {
    Ok(Company {
        id: row.get(0)?,
        name: row.get(1)?,
        user_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub fn list_companies(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
) -> rusqlite::Result<Vec<Company>> {
    let sql = format!(
        "SELECT id, name, user_id, created_at
         FROM {}
         WHERE user_id = ?
         ORDER BY name",
        portfolio.companies_table()
    );
    let mut stmt = conn.prepare(&sql)?;

    let companies = stmt
        .query_map([owner], row_to_company)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(%portfolio, count = companies.len(), "Listed companies");
    Ok(companies)
}

pub fn get_company(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
    id: &str,
) -> rusqlite::Result<Option<Company>> {
    let sql = format!(
        "SELECT id, name, user_id, created_at FROM {} WHERE id = ? AND user_id = ?",
        portfolio.companies_table()
    );
    conn.query_row(&sql, params![id, owner], row_to_company)
        .optional()
}

pub fn create_company(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
    company: &NewCompany,
) -> rusqlite::Result<String> {
    let id = Uuid::new_v4().to_string();
    let sql = format!(
        "INSERT INTO {} (id, name, user_id) VALUES (?, ?, ?)",
        portfolio.companies_table()
    );
    conn.execute(&sql, params![id, company.name, owner])?;
    info!(%portfolio, company_id = %id, name = %company.name, "Created company");
    Ok(id)
}

pub fn rename_company(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
    id: &str,
    name: &str,
) -> rusqlite::Result<bool> {
    let sql = format!(
        "UPDATE {} SET name = ? WHERE id = ? AND user_id = ?",
        portfolio.companies_table()
    );
    let rows = conn.execute(&sql, params![name, id, owner])?;
    if rows > 0 {
        info!(%portfolio, company_id = %id, name = %name, "Renamed company");
    }
    Ok(rows > 0)
}

/// Delete a company; its payments go with it through the foreign key cascade.
pub fn delete_company(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
    id: &str,
) -> rusqlite::Result<bool> {
    let sql = format!(
        "DELETE FROM {} WHERE id = ? AND user_id = ?",
        portfolio.companies_table()
    );
    let rows = conn.execute(&sql, params![id, owner])?;
    if rows > 0 {
        info!(%portfolio, company_id = %id, "Deleted company");
    }
    Ok(rows > 0)
}
