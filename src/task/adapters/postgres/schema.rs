//! Diesel schema for task persistence.

diesel::table! {
    /// Task records for the home-service pipeline.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Client-supplied request description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Vendor outreach records as a JSON array.
        vendors -> Jsonb,
        /// Number of outreach emails sent.
        emails_sent -> Int8,
        /// Agent summary, set once on completion.
        agent_response -> Nullable<Text>,
        /// Error message, set when processing fails.
        error_message -> Nullable<Text>,
        /// Append-only audit events as a JSON array.
        events -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}
