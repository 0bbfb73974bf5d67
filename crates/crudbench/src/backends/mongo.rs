//! MongoDB backend for comparison benchmarks.

use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};
use tokio::runtime::Runtime;

use crate::error::{Error, Result};
use crate::fixtures::Record;

use super::{Backend, MONGO_REGEX_PATTERN};

/// MongoDB backend for benchmarks.
pub struct MongoBackend {
    collection: Collection<Record>,
    rt: Runtime,
}

impl MongoBackend {
    /// Connect to `uri` and bind to `database.collection`.
    pub fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let rt = Runtime::new().map_err(Error::Runtime)?;
        let client = rt.block_on(Client::with_uri_str(uri))?;
        let collection = client.database(database).collection::<Record>(collection);

        Ok(Self { collection, rt })
    }
}

fn regex_filter(pattern: &str) -> Document {
    doc! { "value": { "$regex": pattern } }
}

impl Backend for MongoBackend {
    fn name(&self) -> &str {
        "MongoDB"
    }

    fn pattern(&self) -> &str {
        MONGO_REGEX_PATTERN
    }

    /// Single `insert_many` call.
    fn insert(&mut self, records: &[Record]) -> Result<()> {
        // insert_many rejects an empty batch
        if records.is_empty() {
            return Ok(());
        }
        self.rt
            .block_on(async { self.collection.insert_many(records).await })?;
        Ok(())
    }

    fn select(&mut self, pattern: &str) -> Result<Vec<Record>> {
        let filter = regex_filter(pattern);
        let records = self.rt.block_on(async {
            let cursor = self.collection.find(filter).await?;
            cursor.try_collect::<Vec<_>>().await
        })?;
        Ok(records)
    }

    fn delete(&mut self, pattern: &str) -> Result<u64> {
        let filter = regex_filter(pattern);
        let result = self
            .rt
            .block_on(async { self.collection.delete_many(filter).await })?;
        Ok(result.deleted_count)
    }
}
