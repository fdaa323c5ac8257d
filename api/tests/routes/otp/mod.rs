mod issue_code_test;
mod send_code_test;
mod verify_code_test;
