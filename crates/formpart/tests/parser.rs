use formpart::{
    Body, MemoryStreamProvider, MemoryUploadedFileProvider, ParseError, Parser, Request,
    ServerRequest, UploadStatus, UploadedFile, Value, ValueMap,
};

const BOUNDARY: &str = "b----1234";

fn multipart_request(body: &str) -> Request {
    Request::new("PUT", "/upload")
        .with_header(
            "Content-Type",
            format!("multipart/form-data;boundary={BOUNDARY}"),
        )
        .with_body(Body::Bytes(body.as_bytes().to_vec()))
}

fn parse_request(request: &Request) -> Result<Parser, ParseError> {
    Parser::from_request(request, &MemoryUploadedFileProvider, &MemoryStreamProvider)
}

fn file_at<'a>(tree: &'a ValueMap<UploadedFile>, key: &str) -> &'a UploadedFile {
    tree.get(key)
        .and_then(Value::as_leaf)
        .expect("uploaded file leaf")
}

#[test]
fn decorates_a_request_with_fields_and_files() {
    let body = concat!(
        "--b----1234\r\n",
        "Content-Disposition: form-data; name=\"foo\"\r\n",
        "\r\n",
        "this is a test\r\n",
        "--b----1234\r\n",
        "Content-Disposition: form-data; name=\"bar[]\"\r\n",
        "\r\n",
        "x\r\nA\r\n",
        "--b----1234\r\n",
        "Content-Disposition: form-data; name=\"upload\"; filename=\"text.txt\"\r\n",
        "Content-Type: text/plain\r\n",
        "\r\n",
        "file contents\r\n",
        "--b----1234--\r\n",
    );

    let request = multipart_request(body);
    let parser = parse_request(&request).expect("multipart parse");
    assert_eq!(parser.boundary(), BOUNDARY);

    let request = parser.decorate_request(request);

    let fields = request.parsed_body().expect("parsed body attached");
    assert_eq!(
        serde_json::to_value(fields).expect("json"),
        serde_json::json!({"foo": "this is a test", "bar": ["x\r\nA"]})
    );

    let files = request.uploaded_files().expect("uploaded files attached");
    let upload = file_at(files, "upload");
    assert_eq!(upload.filename(), "text.txt");
    assert_eq!(upload.media_type(), "text/plain");
    assert_eq!(upload.size(), 13);
    assert_eq!(upload.status(), UploadStatus::Ok);
    assert_eq!(upload.stream().bytes(), b"file contents");
}

#[test]
fn missing_content_type_header_reports_wrong_content_type() {
    let request = Request::new("PUT", "/upload").with_body(Body::Bytes(b"ignored".to_vec()));
    let err = parse_request(&request).expect_err("no content type");
    assert_eq!(err, ParseError::WrongContentType(String::new()));
}

#[test]
fn non_multipart_request_is_rejected() {
    let request = Request::new("PUT", "/upload")
        .with_header("Content-Type", "application/json")
        .with_body(Body::Bytes(b"{}".to_vec()));
    let err = parse_request(&request).expect_err("wrong media type");
    assert_eq!(
        err,
        ParseError::WrongContentType("application/json".to_string())
    );
}

#[test]
fn empty_body_decorates_with_empty_trees() {
    let request = multipart_request("");
    let parser = parse_request(&request).expect("multipart parse");
    let request = parser.decorate_request(request);

    assert!(request.parsed_body().expect("parsed body").is_empty());
    assert!(request.uploaded_files().expect("uploaded files").is_empty());
}

#[test]
fn nested_trees_stay_parallel_across_fields_and_files() {
    let body = concat!(
        "--b----1234\r\n",
        "Content-Disposition: form-data; name=\"doc[title]\"\r\n",
        "\r\n",
        "report\r\n",
        "--b----1234\r\n",
        "Content-Disposition: form-data; name=\"doc[pages][]\"; filename=\"p1.txt\"\r\n",
        "\r\n",
        "page one\r\n",
        "--b----1234\r\n",
        "Content-Disposition: form-data; name=\"doc[pages][]\"; filename=\"p2.txt\"\r\n",
        "\r\n",
        "page two\r\n",
        "--b----1234--\r\n",
    );

    let request = multipart_request(body);
    let (fields, files) = parse_request(&request).expect("multipart parse").into_trees();

    let title = fields
        .get("doc")
        .and_then(|doc| doc.get("title"))
        .and_then(Value::as_str);
    assert_eq!(title, Some("report"));

    let pages = files
        .get("doc")
        .and_then(|doc| doc.get("pages"))
        .and_then(Value::as_seq)
        .expect("pages sequence");
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].as_leaf().expect("first page").filename(), "p1.txt");
    assert_eq!(
        pages[1].as_leaf().expect("second page").stream().bytes(),
        b"page two"
    );
}

#[test]
fn body_bytes_remain_available_after_decoding() {
    let body = concat!(
        "--b----1234\r\n",
        "Content-Disposition: form-data; name=\"bar\"\r\n",
        "\r\n",
        "baz\r\n",
        "--b----1234--\r\n",
    );

    let request = multipart_request(body);
    let parser = parse_request(&request).expect("multipart parse");
    let request = parser.decorate_request(request);

    // Decoration only attaches trees; the raw body is untouched.
    assert_eq!(ServerRequest::body(&request), body.as_bytes());
}
