//! Diesel schema for correlation persistence.

diesel::table! {
    /// Merge/pull requests observed on either side of a link.
    pull_requests (id) {
        /// Internal record identifier.
        id -> Uuid,
        /// Project namespace.
        #[max_length = 255]
        namespace -> Varchar,
        /// Repository name.
        #[max_length = 255]
        repo_name -> Varchar,
        /// Project web URL.
        #[max_length = 512]
        project_url -> Varchar,
        /// Request number on the hosting system.
        pr_number -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Source request to downstream request links.
    request_links (source_id) {
        /// Source request record.
        source_id -> Uuid,
        /// Downstream request record.
        downstream_id -> Uuid,
        /// Link timestamp.
        linked_at -> Timestamptz,
    }
}
