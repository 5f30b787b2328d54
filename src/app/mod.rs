use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use netgraph_view::config::ViewConfig;
use netgraph_view::dataset::load_model;
use netgraph_view::network::{GraphModel, ViewportController};

mod graph;
mod ui;

pub struct NetworkApp {
    dataset_path: Option<PathBuf>,
    config: ViewConfig,
    state: AppState,
    reload_rx: Option<Receiver<Result<GraphModel, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<GraphModel, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    controller: ViewportController,
    source_label: String,
    /// Set until the canvas has a size and the graph has been fitted into it.
    needs_initial_fit: bool,
    match_list_cache: Option<MatchListCache>,
    related_rows_visible: usize,
}

struct MatchListCache {
    term: String,
    ids: Vec<String>,
}

impl NetworkApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset_path: Option<PathBuf>,
        config: ViewConfig,
    ) -> Self {
        let state = AppState::Loading {
            rx: Self::spawn_load(dataset_path.clone()),
        };
        Self {
            dataset_path,
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(dataset_path: Option<PathBuf>) -> Receiver<Result<GraphModel, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_model(dataset_path.as_deref()).map_err(|error| {
                log::error!("failed to load graph: {error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn source_label(&self) -> String {
        self.dataset_path
            .as_ref()
            .map_or_else(|| "sample network".to_owned(), |path| path.display().to_string())
    }

    fn ready(&self, model: GraphModel) -> AppState {
        match ViewModel::new(model, self.config.clone(), self.source_label()) {
            Ok(view) => AppState::Ready(Box::new(view)),
            Err(error) => {
                log::error!("invalid view configuration: {error}");
                AppState::Error(format!("Invalid view configuration: {error}"))
            }
        }
    }
}

impl eframe::App for NetworkApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let mut retry = false;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(result),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading connection graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the connection graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.dataset_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if retry {
            self.state = AppState::Loading {
                rx: Self::spawn_load(self.dataset_path.clone()),
            };
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(model) => self.ready(model),
                Err(error) => AppState::Error(error),
            };
        }
    }
}
