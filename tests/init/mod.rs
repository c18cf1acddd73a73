mod commands_outside_a_repository_fail;
mod init_creates_the_repository_layout;
