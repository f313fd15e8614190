// Mirrors migrations/ up to 2024-05-02-000000_star_view_utc_order.
// `star_view` is a view; diesel only reads it.

diesel::table! {
    repo (id) {
        id -> BigInt,
        full_name -> Text,
        description -> Nullable<Text>,
        private -> Bool,
        created_at -> Nullable<Text>,
        updated_at -> Nullable<Text>,
        pushed_at -> Nullable<Text>,
        stargazers_count -> BigInt,
        watchers_count -> BigInt,
        forks -> BigInt,
        lang -> Nullable<Text>,
        homepage -> Nullable<Text>,
    }
}

diesel::table! {
    star (repo_id) {
        repo_id -> BigInt,
        starred_at -> Text,
    }
}

diesel::table! {
    star_view (id) {
        id -> BigInt,
        full_name -> Text,
        description -> Nullable<Text>,
        private -> Bool,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
        pushed_at -> Nullable<Timestamp>,
        stargazers_count -> BigInt,
        watchers_count -> BigInt,
        forks -> BigInt,
        lang -> Nullable<Text>,
        homepage -> Nullable<Text>,
        starred_at -> Timestamp,
        starred_at_utc -> Text,
    }
}

diesel::joinable!(star -> repo (repo_id));

diesel::allow_tables_to_appear_in_same_query!(
    repo,
    star,
);
