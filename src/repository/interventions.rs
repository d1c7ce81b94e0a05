//! PostgreSQL intervention repository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{types::Json, FromRow, Pool, Postgres};

use super::InterventionRepository;
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::InterventionStatus,
        intervention::{CreateIntervention, Intervention, MaterialUsed, TimeEntry, UpdateIntervention},
    },
};

#[derive(Clone)]
pub struct PgInterventionRepository {
    pool: Pool<Postgres>,
}

impl PgInterventionRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Row as stored in the `interventions` table
#[derive(Debug, FromRow)]
struct InterventionRow {
    id: String,
    company_name: String,
    email: String,
    phone: String,
    address: String,
    system_type: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    serial_number: Option<String>,
    installation_location: Option<String>,
    internal_reference: Option<String>,
    scheduled_date: Option<NaiveDate>,
    scheduled_time: Option<String>,
    status: String,
    assigned_technicians: Option<String>,
    office_notes: Option<String>,
    concluded: bool,
    quote_requested: bool,
    client_absent: bool,
    work_description: Option<String>,
    conclusion_notes: Option<String>,
    kilometers: Option<f64>,
    time_entries: Json<Vec<TimeEntry>>,
    materials: Json<Vec<MaterialUsed>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InterventionRow> for Intervention {
    type Error = AppError;

    fn try_from(row: InterventionRow) -> Result<Self, Self::Error> {
        let status: InterventionStatus = row.status.parse().map_err(|_| {
            AppError::Internal(format!("Intervention {} has unknown status '{}'", row.id, row.status))
        })?;

        Ok(Self {
            id: row.id,
            company_name: row.company_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            system_type: row.system_type,
            brand: row.brand,
            model: row.model,
            serial_number: row.serial_number,
            installation_location: row.installation_location,
            internal_reference: row.internal_reference,
            scheduled_date: row.scheduled_date,
            scheduled_time: row.scheduled_time,
            status,
            assigned_technicians: row.assigned_technicians,
            office_notes: row.office_notes,
            concluded: row.concluded,
            quote_requested: row.quote_requested,
            client_absent: row.client_absent,
            work_description: row.work_description,
            conclusion_notes: row.conclusion_notes,
            kilometers: row.kilometers,
            time_entries: row.time_entries.0,
            materials: row.materials.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl InterventionRepository for PgInterventionRepository {
    async fn list(&self) -> AppResult<Vec<Intervention>> {
        let rows = sqlx::query_as::<_, InterventionRow>(
            "SELECT * FROM interventions ORDER BY created_at, id"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Intervention::try_from).collect()
    }

    async fn get(&self, id: &str) -> AppResult<Intervention> {
        sqlx::query_as::<_, InterventionRow>("SELECT * FROM interventions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Intervention {} not found", id)))?
            .try_into()
    }

    async fn create(&self, data: &CreateIntervention) -> AppResult<Intervention> {
        let row = sqlx::query_as::<_, InterventionRow>(
            r#"
            INSERT INTO interventions (
                company_name, email, phone, address,
                system_type, brand, model, serial_number,
                installation_location, internal_reference,
                scheduled_date, scheduled_time,
                status, assigned_technicians, office_notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&data.company_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(&data.system_type)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(&data.installation_location)
        .bind(&data.internal_reference)
        .bind(data.scheduled_date)
        .bind(&data.scheduled_time)
        .bind(InterventionStatus::default().as_str())
        .bind(&data.assigned_technicians)
        .bind(&data.office_notes)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn update(&self, id: &str, data: &UpdateIntervention) -> AppResult<Intervention> {
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

        macro_rules! add_field {
            ($($field:ident),* $(,)?) => {
                $(
                    if data.$field.is_some() {
                        sets.push(format!("{} = ${}", stringify!($field), idx));
                        idx += 1;
                    }
                )*
            };
        }

        add_field!(
            company_name,
            email,
            phone,
            address,
            system_type,
            brand,
            model,
            serial_number,
            installation_location,
            internal_reference,
            scheduled_date,
            scheduled_time,
            assigned_technicians,
            office_notes,
            concluded,
            quote_requested,
            client_absent,
            work_description,
            conclusion_notes,
            kilometers,
            status,
            time_entries,
            materials,
        );

        let query = format!(
            "UPDATE interventions SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, InterventionRow>(&query);

        macro_rules! bind_field {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(ref val) = data.$field {
                        builder = builder.bind(val);
                    }
                )*
            };
        }

        // Same order as add_field! above
        bind_field!(
            company_name,
            email,
            phone,
            address,
            system_type,
            brand,
            model,
            serial_number,
            installation_location,
            internal_reference,
            scheduled_date,
            scheduled_time,
            assigned_technicians,
            office_notes,
            concluded,
            quote_requested,
            client_absent,
            work_description,
            conclusion_notes,
            kilometers,
        );
        if let Some(status) = data.status {
            builder = builder.bind(status.as_str());
        }
        if let Some(ref entries) = data.time_entries {
            builder = builder.bind(Json(entries));
        }
        if let Some(ref materials) = data.materials {
            builder = builder.bind(Json(materials));
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Intervention {} not found", id)))?
            .try_into()
    }
}
