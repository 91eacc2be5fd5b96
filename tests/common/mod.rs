#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Creates a temporary route file with the given extension
    ///
    /// The file is removed when the returned handle is dropped.
    pub fn create_temp_routes(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("routemount_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .expect("create temp route file");
        file.write_all(content.as_bytes())
            .expect("write temp route file");
        file.flush().expect("flush temp route file");
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_routes(content, "yaml")
    }

    pub fn create_temp_toml(content: &str) -> NamedTempFile {
        create_temp_routes(content, "toml")
    }
}

pub mod recorder {
    use routemount::handler::{HandlerRef, ResponseBody};
    use routemount::pattern::Params;
    use std::sync::{Arc, Mutex};

    /// Shared log of handler invocations, in order
    #[derive(Clone, Default)]
    pub struct Recorder {
        calls: Arc<Mutex<Vec<(String, Vec<Option<String>>)>>>,
    }

    impl Recorder {
        pub fn new() -> Self {
            Self::default()
        }

        /// A direct handler that records `name` and its parameters, and writes `name`
        /// to the response body
        pub fn handler(&self, name: &str) -> HandlerRef {
            let calls = Arc::clone(&self.calls);
            let name = name.to_string();
            HandlerRef::direct(move |params: &Params, out: &mut ResponseBody| {
                calls
                    .lock()
                    .unwrap()
                    .push((name.clone(), params.as_slice().to_vec()));
                out.write_str(&name);
                out.write_str(";");
                Ok(())
            })
        }

        pub fn names(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(n, _)| n.clone())
                .collect()
        }

        pub fn params_of(&self, name: &str) -> Option<Vec<Option<String>>> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, p)| p.clone())
        }

        pub fn clear(&self) {
            self.calls.lock().unwrap().clear();
        }
    }
}
