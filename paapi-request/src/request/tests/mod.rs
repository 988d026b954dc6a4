mod proptest_request;
