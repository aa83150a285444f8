use diesel::prelude::*;
use anyhow::Result;

use crate::db::DatabaseHandle;
use crate::db::bblx_models::*;
use crate::logger::error;
use crate::types::{ModuleMetadata, VerseRecord};

pub type BblxDbHandle = DatabaseHandle;

// Keep batches well below the SQLite bind-variable limit (4 columns per row).
const INSERT_CHUNK_SIZE: usize = 500;

impl BblxDbHandle {
    /// Insert the metadata record for this run.
    ///
    /// A fresh row is appended on every run. Re-running against an
    /// existing module file therefore accumulates `Details` rows.
    pub fn insert_details(&self, meta: &ModuleMetadata) -> Result<()> {
        use crate::db::bblx_schema::Details;

        let row = NewDetails {
            description: &meta.description,
            abbreviation: &meta.abbreviation,
            comments: &meta.comments,
            version: &meta.version,
            publish_date: &meta.publish_date,
            publisher: &meta.publisher,
            creator: &meta.creator,
            language: &meta.language,
        };

        self.do_write(|db_conn| {
            diesel::insert_into(Details::table)
                .values(&row)
                .execute(db_conn)
        })?;

        Ok(())
    }

    /// Upsert a file's verses under the given canonical book number.
    ///
    /// Keyed by (Book, Chapter, Verse); an existing row with the same key
    /// is overwritten, last write wins. All rows go in one transaction.
    pub fn upsert_verses(&self, book_number: i32, verses: &[VerseRecord]) -> Result<usize> {
        use crate::db::bblx_schema::Bible;

        let rows: Vec<NewBibleVerse> = verses
            .iter()
            .map(|v| NewBibleVerse {
                book: book_number,
                chapter: v.chapter,
                verse: v.verse,
                scripture: &v.text,
            })
            .collect();

        self.do_write(|db_conn| {
            db_conn.transaction::<_, diesel::result::Error, _>(|transaction_conn| {
                for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
                    diesel::replace_into(Bible::table)
                        .values(chunk)
                        .execute(transaction_conn)?;
                }
                Ok(())
            })
        })?;

        Ok(rows.len())
    }

    pub fn get_verse(&self, book: i32, chapter: i32, verse: i32) -> Option<BibleVerse> {
        use crate::db::bblx_schema::Bible::dsl::*;

        let result = self.do_read(|db_conn| {
            Bible
                .filter(Book.eq(book))
                .filter(Chapter.eq(chapter))
                .filter(Verse.eq(verse))
                .select(BibleVerse::as_select())
                .first(db_conn)
                .optional()
        });

        match result {
            Ok(x) => x,
            Err(e) => {
                error(&format!("get_verse(): {}", e));
                None
            }
        }
    }

    pub fn count_verses(&self) -> Result<i64> {
        use crate::db::bblx_schema::Bible::dsl::*;

        self.do_read(|db_conn| Bible.count().get_result::<i64>(db_conn))
    }

    pub fn get_details(&self) -> Result<Vec<DetailsRow>> {
        use crate::db::bblx_schema::Details::dsl::*;

        self.do_read(|db_conn| {
            Details
                .select(DetailsRow::as_select())
                .load::<DetailsRow>(db_conn)
        })
    }
}
