// Hand-maintained, the BBLX schema is fixed by the e-Sword format.
#![allow(non_snake_case)]

diesel::table! {
    Bible (Book, Chapter, Verse) {
        Book -> Integer,
        Chapter -> Integer,
        Verse -> Integer,
        Scripture -> Text,
    }
}

diesel::table! {
    Details (Description) {
        Description -> Text,
        Abbreviation -> Text,
        Comments -> Text,
        Version -> Text,
        PublishDate -> Text,
        Publisher -> Text,
        Creator -> Text,
        Language -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(Bible, Details);
