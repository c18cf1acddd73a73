mod print_clean_status;
mod report_divergence_from_upstream;
mod report_table_changes;
