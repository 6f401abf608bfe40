use crate::models::{NewPayment, Payment, PaymentUpdate, Portfolio};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
pub struct PaymentFilter {
    pub company_id: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl PaymentFilter {
    pub fn between(from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self {
            from_date: Some(from_date),
            to_date: Some(to_date),
            ..Default::default()
        }
    }
}

fn row_to_payment(row: &Row) -> rusqlite::Result<Payment> {
    Ok(Payment {
        id: row.get(0)?,
        company_id: row.get(1)?,
        amount_cents: row.get(2)?,
        payment_date: row.get(3)?,
        user_id: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Payments of `owner`, newest first, optionally narrowed to a company and
/// an inclusive date range.
pub fn list_payments(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
    filter: &PaymentFilter,
) -> rusqlite::Result<Vec<Payment>> {
    let mut sql = format!(
        "SELECT id, company_id, amount_cents, payment_date, user_id, created_at
         FROM {}
         WHERE user_id = ?",
        portfolio.payments_table()
    );
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(owner.to_string())];

    if let Some(ref company_id) = filter.company_id {
        sql.push_str(" AND company_id = ?");
        params_vec.push(Box::new(company_id.clone()));
    }
    if let Some(from_date) = filter.from_date {
        sql.push_str(" AND payment_date >= ?");
        params_vec.push(Box::new(from_date));
    }
    if let Some(to_date) = filter.to_date {
        sql.push_str(" AND payment_date <= ?");
        params_vec.push(Box::new(to_date));
    }
    sql.push_str(" ORDER BY payment_date DESC, created_at DESC");

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;

    let payments = stmt
        .query_map(params_refs.as_slice(), row_to_payment)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(%portfolio, count = payments.len(), "Listed payments");
    Ok(payments)
}

pub fn get_payment(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
    id: &str,
) -> rusqlite::Result<Option<Payment>> {
    let sql = format!(
        "SELECT id, company_id, amount_cents, payment_date, user_id, created_at
         FROM {} WHERE id = ? AND user_id = ?",
        portfolio.payments_table()
    );
    conn.query_row(&sql, params![id, owner], row_to_payment)
        .optional()
}

pub fn create_payment(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
    payment: &NewPayment,
) -> rusqlite::Result<String> {
    let id = Uuid::new_v4().to_string();
    let sql = format!(
        "INSERT INTO {} (id, company_id, amount_cents, payment_date, user_id)
         VALUES (?, ?, ?, ?, ?)",
        portfolio.payments_table()
    );
    conn.execute(
        &sql,
        params![
            id,
            payment.company_id,
            payment.amount_cents,
            payment.payment_date,
            owner
        ],
    )?;
    info!(
        %portfolio,
        payment_id = %id,
        company_id = %payment.company_id,
        amount_cents = payment.amount_cents,
        "Recorded payment"
    );
    Ok(id)
}

pub fn update_payment(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
    id: &str,
    update: &PaymentUpdate,
) -> rusqlite::Result<bool> {
    let sql = format!(
        "UPDATE {}
         SET amount_cents = ?, payment_date = COALESCE(?, payment_date)
         WHERE id = ? AND user_id = ?",
        portfolio.payments_table()
    );
    let rows = conn.execute(
        &sql,
        params![update.amount_cents, update.payment_date, id, owner],
    )?;
    if rows > 0 {
        info!(%portfolio, payment_id = %id, amount_cents = update.amount_cents, "Updated payment");
    }
    Ok(rows > 0)
}

pub fn delete_payment(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
    id: &str,
) -> rusqlite::Result<bool> {
    let sql = format!(
        "DELETE FROM {} WHERE id = ? AND user_id = ?",
        portfolio.payments_table()
    );
    let rows = conn.execute(&sql, params![id, owner])?;
    if rows > 0 {
        info!(%portfolio, payment_id = %id, "Deleted payment");
    }
    Ok(rows > 0)
}
