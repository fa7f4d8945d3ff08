use std::{
    sync::{Arc, Mutex},
    thread,
};

use tiny_http::{Header, Method, Request, Response, ResponseBox, Server};

pub struct File {
    pub url_path: String,
    pub content_type: String,
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl File {
    pub fn new(url_path: &str, content_type: &str, bytes: &[u8]) -> Self {
        Self {
            url_path: url_path.to_owned(),
            content_type: content_type.to_owned(),
            status: 200,
            bytes: bytes.to_owned(),
        }
    }

    pub fn css(url_path: &str, css: &str) -> Self {
        Self::new(url_path, "text/css; charset=utf-8", css.as_bytes())
    }

    pub fn font(url_path: &str, bytes: &[u8]) -> Self {
        Self::new(url_path, "font/woff2", bytes)
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

struct State {
    files: Vec<File>,
    // Every requested url including its query
    requests: Mutex<Vec<String>>,
}

/// Spin up a server, so we can test network requests without external services
///
/// The files get generated from the server's base url so that they can reference each other
pub fn mock_file_server<F>(make_files: F) -> HttpServer
where
    F: FnOnce(&str) -> Vec<File>,
{
    HttpServer::spawn(make_files, |state, req| match req.method() {
        Method::Get => {
            let url = req.url();
            state.requests.lock().unwrap().push(url.to_owned());
            // An exact match including the query wins over just matching the path
            let path = url.split_once('?').map_or(url, |(path, _)| path);
            let file = state
                .files
                .iter()
                .find(|file| file.url_path == url)
                .or_else(|| state.files.iter().find(|file| file.url_path == path));
            match file {
                Some(file) => {
                    let header =
                        Header::from_bytes(b"Content-Type", file.content_type.as_bytes()).unwrap();
                    Response::from_data(file.bytes.clone())
                        .with_status_code(file.status)
                        .with_header(header)
                        .boxed()
                }
                None => Response::empty(404).boxed(),
            }
        }
        _ => Response::empty(405).boxed(),
    })
}

pub struct HttpServer {
    url: String,
    server: Arc<Server>,
    state: Arc<State>,
}

impl HttpServer {
    // Spawn the server
    // |-> Move a handle to a request handler thread
    // |   \-> Each request gets handled on a newly spawned thread
    // \-> Return a server guard that shuts down on `drop()`
    fn spawn<M, F>(make_files: M, handler_fn: F) -> Self
    where
        M: FnOnce(&str) -> Vec<File>,
        F: Fn(&State, &Request) -> ResponseBox + Send + Copy + 'static,
    {
        // Bind to the ephemeral port and then get the actual resolved address
        let server = Server::http("127.0.0.1:0").unwrap();
        let ip = server
            .server_addr()
            .to_ip()
            .expect("Provided addr is an ip");
        // We're using an `::http()` server
        let url = format!("http://{ip}");

        let state = Arc::new(State {
            files: make_files(&url),
            requests: Mutex::default(),
        });
        let server = Arc::new(server);

        {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for req in server.incoming_requests() {
                    let state = Arc::clone(&state);
                    thread::spawn(move || {
                        let resp = handler_fn(&state, &req);
                        let _ = req.respond(resp);
                    });
                }
                // Time to shutdown now
            });
        }

        Self { url, server, state }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for HttpServer {
    fn drop(&mut self) {
        // Unblock the `.incoming_requests()`
        self.server.unblock();
    }
}
