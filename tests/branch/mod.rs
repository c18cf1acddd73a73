mod create_and_list_branches;
mod set_upstream;
