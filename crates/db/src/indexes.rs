use mongodb::{Database, IndexModel, options::IndexOptions};
use tracing::info;

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Users
    create_indexes(
        db,
        "users",
        vec![
            index_unique(bson::doc! { "email": 1 }),
            // Single administrator: at most one document may carry the
            // flag, so concurrent bootstrap attempts collide here instead
            // of racing a count.
            index_unique_partial(
                bson::doc! { "is_admin": 1 },
                bson::doc! { "is_admin": true },
            ),
        ],
    )
    .await?;

    // Doctors: one profile per user account
    create_indexes(
        db,
        "doctors",
        vec![
            index_unique(bson::doc! { "user_id": 1 }),
            index(bson::doc! { "status": 1 }),
        ],
    )
    .await?;

    // Appointments: the slot key is the collision arena — a duplicate
    // insert on the exact same (doctor, day, instant) fails at the
    // storage layer instead of racing the availability check.
    create_indexes(
        db,
        "appointments",
        vec![
            index_unique(bson::doc! { "doctor_id": 1, "date": 1, "time": 1 }),
            index(bson::doc! { "user_id": 1, "created_at": -1 }),
        ],
    )
    .await?;

    info!("All indexes ensured");
    Ok(())
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    info!(collection, "Indexes created");
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

fn index_unique(keys: bson::Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

fn index_unique_partial(keys: bson::Document, filter: bson::Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(
            IndexOptions::builder()
                .unique(true)
                .partial_filter_expression(filter)
                .build(),
        )
        .build()
}
