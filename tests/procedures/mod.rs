mod call_commit_procedures;
