mod print_history_newest_first;
