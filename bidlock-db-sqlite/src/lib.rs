use async_trait::async_trait;
use bidlock_core::{
    NewProposal, PaymentTerms, PropertyType, Proposal, ProposalRepository, ProposalStatus,
    RepositoryError, ServiceItem,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, sqlite::SqlitePool};
use tracing::debug;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct SqliteProposalRepository {
    pool: SqlitePool,
}

impl SqliteProposalRepository {
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(FromRow)]
struct ProposalRow {
    id: i64,
    customer_name: String,
    customer_phone: Option<String>,
    customer_email: Option<String>,
    customer_address: Option<String>,
    property_type: Option<String>,
    services: String,
    photos: String,
    subtotal: String,
    tax_rate: String,
    total: String,
    payment_terms: String,
    valid_days: i32,
    status: String,
    signature: Option<String>,
    created_at: String,
    sent_at: Option<String>,
    signed_at: Option<String>,
}

impl TryFrom<ProposalRow> for Proposal {
    type Error = RepositoryError;

    fn try_from(row: ProposalRow) -> Result<Self, Self::Error> {
        let property_type = row
            .property_type
            .as_deref()
            .map(|s| {
                PropertyType::parse(s).ok_or_else(|| {
                    RepositoryError::Database(format!("Invalid property type: {s}"))
                })
            })
            .transpose()?;
        let payment_terms = PaymentTerms::parse(&row.payment_terms).ok_or_else(|| {
            RepositoryError::Database(format!("Invalid payment terms: {}", row.payment_terms))
        })?;
        let status = ProposalStatus::parse(&row.status)
            .ok_or_else(|| RepositoryError::Database(format!("Invalid status: {}", row.status)))?;

        Ok(Proposal {
            id: row.id,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            customer_email: row.customer_email,
            customer_address: row.customer_address,
            property_type,
            services: parse_json(&row.services)?,
            photos: parse_json(&row.photos)?,
            subtotal: parse_decimal(&row.subtotal)?,
            tax_rate: parse_decimal(&row.tax_rate)?,
            total: parse_decimal(&row.total)?,
            payment_terms,
            valid_days: row.valid_days,
            status,
            signature: row.signature,
            created_at: parse_datetime(&row.created_at)?,
            sent_at: parse_optional_datetime(&row.sent_at)?,
            signed_at: parse_optional_datetime(&row.signed_at)?,
        })
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, RepositoryError> {
    s.parse::<Decimal>()
        .map_err(|e| RepositoryError::Database(format!("Failed to parse decimal '{s}': {e}")))
}

fn parse_json<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, RepositoryError> {
    serde_json::from_str(s)
        .map_err(|e| RepositoryError::Database(format!("Failed to parse JSON column: {e}")))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    // SQLite stores timestamps in various formats, try common ones
    chrono::NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| RepositoryError::Database(format!("Failed to parse datetime '{s}': {e}")))
}

fn parse_optional_datetime(s: &Option<String>) -> Result<Option<DateTime<Utc>>, RepositoryError> {
    s.as_ref().map(|s| parse_datetime(s)).transpose()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value)
        .map_err(|e| RepositoryError::Database(format!("Failed to encode JSON column: {e}")))
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

const SELECT_COLUMNS: &str = "id, customer_name, customer_phone, customer_email, \
     customer_address, property_type, services, photos, subtotal, tax_rate, total, \
     payment_terms, valid_days, status, signature, created_at, sent_at, signed_at";

#[async_trait]
impl ProposalRepository for SqliteProposalRepository {
    async fn create_proposal(&self, proposal: NewProposal) -> Result<Proposal, RepositoryError> {
        let now = format_timestamp(Utc::now());
        let services: Vec<ServiceItem> = proposal.services;

        let result = sqlx::query(
            "INSERT INTO proposals (
                customer_name, customer_phone, customer_email, customer_address,
                property_type, services, photos, subtotal, tax_rate, total,
                payment_terms, valid_days, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&proposal.customer_name)
        .bind(&proposal.customer_phone)
        .bind(&proposal.customer_email)
        .bind(&proposal.customer_address)
        .bind(proposal.property_type.map(|p| p.as_str()))
        .bind(to_json(&services)?)
        .bind(to_json(&proposal.photos)?)
        .bind(proposal.subtotal.to_string())
        .bind(proposal.tax_rate.to_string())
        .bind(proposal.total.to_string())
        .bind(proposal.payment_terms.as_str())
        .bind(proposal.valid_days)
        .bind(ProposalStatus::Draft.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        debug!(id, customer = %proposal.customer_name, "proposal created");
        self.get_proposal(id).await
    }

    async fn get_proposal(&self, id: i64) -> Result<Proposal, RepositoryError> {
        let row: ProposalRow = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM proposals WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn list_proposals(
        &self,
        status: Option<ProposalStatus>,
    ) -> Result<Vec<Proposal>, RepositoryError> {
        let rows: Vec<ProposalRow> = match status {
            Some(status) => {
                sqlx::query_as(&format!(
                    "SELECT {SELECT_COLUMNS} FROM proposals
                     WHERE status = ? ORDER BY created_at DESC, id DESC"
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {SELECT_COLUMNS} FROM proposals
                     ORDER BY created_at DESC, id DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn list_proposals_for_customer(
        &self,
        customer_name: &str,
    ) -> Result<Vec<Proposal>, RepositoryError> {
        let rows: Vec<ProposalRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM proposals
             WHERE customer_name = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(customer_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn mark_sent(&self, id: i64, sent_at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE proposals SET status = ?, sent_at = ? WHERE id = ?")
            .bind(ProposalStatus::Sent.as_str())
            .bind(format_timestamp(sent_at))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn record_signature(
        &self,
        id: i64,
        signature: &str,
        signed_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE proposals SET status = ?, signature = ?, signed_at = ? WHERE id = ?",
        )
        .bind(ProposalStatus::Accepted.as_str())
        .bind(signature)
        .bind(format_timestamp(signed_at))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn set_status(&self, id: i64, status: ProposalStatus) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE proposals SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_proposals_for_customer(
        &self,
        customer_name: &str,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM proposals WHERE customer_name = ?")
            .bind(customer_name)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
