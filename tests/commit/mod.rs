mod amend_rewrites_the_tip;
mod commit_prints_the_new_hash;
mod empty_commits;
mod invalid_commit_arguments;
mod stage_before_commit;
mod writers_restrict_commits;
