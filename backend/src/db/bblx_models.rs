use diesel::prelude::*;
use crate::db::bblx_schema::*;

// Queryable struct for reading verse rows
#[derive(Debug, Clone, Queryable, Selectable, PartialEq, Eq)]
#[diesel(table_name = Bible)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BibleVerse {
    #[diesel(column_name = "Book")]
    pub book: i32,
    #[diesel(column_name = "Chapter")]
    pub chapter: i32,
    #[diesel(column_name = "Verse")]
    pub verse: i32,
    #[diesel(column_name = "Scripture")]
    pub scripture: String,
}

// Insertable struct for creating new verse rows
#[derive(Insertable)]
#[diesel(table_name = Bible)]
pub struct NewBibleVerse<'a> {
    #[diesel(column_name = "Book")]
    pub book: i32,
    #[diesel(column_name = "Chapter")]
    pub chapter: i32,
    #[diesel(column_name = "Verse")]
    pub verse: i32,
    #[diesel(column_name = "Scripture")]
    pub scripture: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, PartialEq, Eq)]
#[diesel(table_name = Details)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DetailsRow {
    #[diesel(column_name = "Description")]
    pub description: String,
    #[diesel(column_name = "Abbreviation")]
    pub abbreviation: String,
    #[diesel(column_name = "Comments")]
    pub comments: String,
    #[diesel(column_name = "Version")]
    pub version: String,
    #[diesel(column_name = "PublishDate")]
    pub publish_date: String,
    #[diesel(column_name = "Publisher")]
    pub publisher: String,
    #[diesel(column_name = "Creator")]
    pub creator: String,
    #[diesel(column_name = "Language")]
    pub language: String,
}

#[derive(Insertable)]
#[diesel(table_name = Details)]
pub struct NewDetails<'a> {
    #[diesel(column_name = "Description")]
    pub description: &'a str,
    #[diesel(column_name = "Abbreviation")]
    pub abbreviation: &'a str,
    #[diesel(column_name = "Comments")]
    pub comments: &'a str,
    #[diesel(column_name = "Version")]
    pub version: &'a str,
    #[diesel(column_name = "PublishDate")]
    pub publish_date: &'a str,
    #[diesel(column_name = "Publisher")]
    pub publisher: &'a str,
    #[diesel(column_name = "Creator")]
    pub creator: &'a str,
    #[diesel(column_name = "Language")]
    pub language: &'a str,
}
