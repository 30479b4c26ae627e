// main.rs — window, event loop and startup options

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod assets;
mod catalog;
mod error;
mod i18n;
mod layout;
mod optics;
mod panels;
mod prefs;
mod renderer;
mod selection;
mod viewport;

use app::App;
use assets::ImageSource;
use i18n::tr;
use renderer::Renderer;

use std::path::PathBuf;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, WindowBuilder},
};

/// Options taken from the command line; `--lang` is read by `i18n::resolve_lang`.
#[derive(Debug, Default, PartialEq)]
struct Options {
    assets: Option<PathBuf>,
    image: Option<PathBuf>,
}

impl Options {
    fn parse(args: &[String]) -> Self {
        let mut options = Self::default();
        let mut it = args.iter().skip(1);
        while let Some(a) = it.next() {
            match a.as_str() {
                "--assets" => options.assets = it.next().map(PathBuf::from),
                "--image" => options.image = it.next().map(PathBuf::from),
                _ => {}
            }
        }
        options
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> error::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = Options::parse(&args);
    if let Some(dir) = options.assets {
        assets::set_asset_root(dir);
    }

    // English tables first so prefs loading can log.
    i18n::init(i18n::Language::En);
    let prefs = prefs::Prefs::load();
    let lang = i18n::resolve_lang(&args, prefs.language);
    i18n::init(lang);

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(tr("app.title"))
        .with_inner_size(LogicalSize::new(1280, 860))
        .build(&event_loop)?;

    let mut renderer = pollster::block_on(Renderer::new(&window))?;

    let reference = options
        .image
        .map(ImageSource::File)
        .unwrap_or_else(ImageSource::reference);
    let mut app = App::new(prefs, lang, reference);
    let mut is_fullscreen = false;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => {
                let response = renderer.egui_state.on_event(&renderer.egui_ctx, &event);
                if response.consumed {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                    }

                    WindowEvent::Resized(new_size) => {
                        renderer.resize(new_size);
                    }

                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        renderer.resize(*new_inner_size);
                    }

                    WindowEvent::KeyboardInput { input, .. } => {
                        if input.state == ElementState::Pressed {
                            match input.virtual_keycode {
                                Some(VirtualKeyCode::O) => app.open_photo_dialog(),
                                Some(VirtualKeyCode::F11) => {
                                    is_fullscreen = !is_fullscreen;
                                    window.set_fullscreen(
                                        is_fullscreen.then_some(Fullscreen::Borderless(None)),
                                    );
                                }
                                _ => {}
                            }
                        }
                    }

                    WindowEvent::DroppedFile(path) => {
                        app.open_dropped(path);
                    }

                    _ => {}
                }
            }

            Event::RedrawRequested(_) => {
                app.poll_images(&renderer.egui_ctx);

                let render_result = renderer.render_with_ui(&window, |ctx| app.ui(ctx));

                if app.take_title_change() {
                    window.set_title(&tr("app.title"));
                }
                if app.exit_requested() {
                    *control_flow = ControlFlow::Exit;
                }

                match render_result {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => *control_flow = ControlFlow::Exit,
                    Err(e) => log::error!(
                        "{}",
                        i18n::tr_with("error.render", &[("err", format!("{e:?}"))])
                    ),
                }
            }

            Event::MainEventsCleared => {
                window.request_redraw();
            }

            _ => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let o = Options::parse(&args(&["mega", "--lang", "zh", "--assets", "/tmp/a", "--image", "p.jpg"]));
        assert_eq!(o.assets, Some(PathBuf::from("/tmp/a")));
        assert_eq!(o.image, Some(PathBuf::from("p.jpg")));
    }

    #[test]
    fn test_parse_options_missing_values() {
        assert_eq!(Options::parse(&args(&["mega"])), Options::default());
        assert_eq!(Options::parse(&args(&["mega", "--image"])).image, None);
    }
}
