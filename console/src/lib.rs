use cfg_if::cfg_if;

#[macro_export]
macro_rules! debug {
    ($($args:tt)*) => {{
        $crate::debug(&format!($($args)*));
    }}
}

#[macro_export]
macro_rules! err {
    ($($args:tt)*) => {{
        $crate::err(&format!($($args)*));
    }}
}

#[macro_export]
macro_rules! log {
    ($($args:tt)*) => {{
        $crate::log(&format!($($args)*));
    }}
}

#[macro_export]
macro_rules! warning {
    ($($args:tt)*) => {{
        $crate::warning(&format!($($args)*));
    }}
}

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        use wasm_bindgen::prelude::*;

        #[wasm_bindgen]
        extern "C" {
            #[wasm_bindgen(js_namespace = console)]
            pub fn debug(s: &str);

            #[wasm_bindgen(js_namespace = console, js_name = error)]
            pub fn err(s: &str);

            #[wasm_bindgen(js_namespace = console)]
            pub fn log(s: &str);

            #[wasm_bindgen(js_namespace = console, js_name = warn)]
            pub fn warning(s: &str);
        }
    } else {
        // off wasm every message goes through the log facade, so the host picks the logger
        const TARGET: &str = "penrose";

        pub fn debug(s: &str) {
            ::log::debug!(target: TARGET, "{}", s);
        }

        pub fn err(s: &str) {
            ::log::error!(target: TARGET, "{}", s);
        }

        pub fn log(s: &str) {
            ::log::info!(target: TARGET, "{}", s);
        }

        pub fn warning(s: &str) {
            ::log::warn!(target: TARGET, "{}", s);
        }
    }
}
