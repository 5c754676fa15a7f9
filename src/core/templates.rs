//! Generated Electron sources.
//!
//! Templates take every project-specific value as a parameter, so the emitted
//! text is final and never patched after it is written.

use crate::domain::model::{ProjectProfile, TemplateKind};
use crate::utils::error::{Result, ScaffoldError};
use std::fs;
use std::path::{Path, PathBuf};

pub const ELECTRON_DIR: &str = "electron";
pub const MAIN_FILE: &str = "main.js";
pub const PRELOAD_FILE: &str = "electron-preload.js";
pub const LOADING_PAGE: &str = "view/loading.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParams {
    pub dev_url: String,
    pub build_output: String,
    pub width: u32,
    pub height: u32,
    pub preload_file: String,
}

impl TemplateParams {
    pub fn from_profile(profile: &ProjectProfile, (width, height): (u32, u32)) -> Self {
        Self {
            dev_url: profile.dev_url(),
            build_output: profile.build_output.clone(),
            width,
            height,
            preload_file: PRELOAD_FILE.to_string(),
        }
    }
}

/// A rendered file, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub relative_path: PathBuf,
    pub content: String,
}

pub fn render_main(kind: TemplateKind, params: &TemplateParams) -> String {
    match kind {
        TemplateKind::Basic => render_basic_main(params),
        TemplateKind::Tray => render_tray_main(params),
    }
}

fn render_basic_main(p: &TemplateParams) -> String {
    format!(
        r#"const {{ app, BrowserWindow }} = require('electron');
const path = require('path');
const isDev = require('electron-is-dev');

// Keep a global reference so the window is not garbage collected.
let mainWindow;

function createWindow() {{
  mainWindow = new BrowserWindow({{
    width: {width},
    height: {height},
    webPreferences: {{
      contextIsolation: true,
      nodeIntegration: false,
      preload: path.join(__dirname, '{preload}')
    }}
  }});

  mainWindow.loadURL(
    isDev
      ? '{dev_url}'
      : `file://${{path.join(__dirname, '{build_output}')}}`
  );

  if (isDev) {{
    mainWindow.webContents.openDevTools();
  }}

  mainWindow.on('closed', () => {{
    mainWindow = null;
  }});
}}

app.on('ready', createWindow);

app.on('window-all-closed', () => {{
  // On macOS apps stay active until the user quits explicitly.
  if (process.platform !== 'darwin') {{
    app.quit();
  }}
}});

app.on('activate', () => {{
  if (mainWindow === null) {{
    createWindow();
  }}
}});
"#,
        width = p.width,
        height = p.height,
        preload = p.preload_file,
        dev_url = p.dev_url,
        build_output = p.build_output,
    )
}

fn render_tray_main(p: &TemplateParams) -> String {
    format!(
        r#"const {{ app, Tray, BrowserWindow, Menu, globalShortcut }} = require('electron');
const path = require('path');
const isDev = require('electron-is-dev');
const {{ autoUpdater }} = require('electron-updater');

const winURL = isDev
  ? '{dev_url}'
  : `file://${{path.join(__dirname, '{build_output}')}}`;

let mainWindow, splashWindow, tray;

function createWindow() {{
  mainWindow = new BrowserWindow({{
    width: {width},
    height: {height},
    show: false,
    webPreferences: {{
      contextIsolation: true,
      nodeIntegration: false,
      preload: path.join(__dirname, '{preload}')
    }}
  }});

  mainWindow.loadURL(winURL);

  if (isDev) {{
    mainWindow.webContents.openDevTools();
  }}

  mainWindow.webContents.on('dom-ready', () => {{
    // Hide the Electron token from the user agent.
    const ua = mainWindow.webContents.getUserAgent().split(' ');
    mainWindow.webContents.setUserAgent(ua.filter((part) => !part.startsWith('Electron')).join(' '));
    closeSplashWindow();
    mainWindow.show();
  }});

  mainWindow.on('closed', () => {{
    mainWindow = null;
  }});

  initAutoUpdate(mainWindow);
}}

function createSplashWindow() {{
  splashWindow = new BrowserWindow({{
    width: 400,
    height: 300,
    frame: false,
    maximizable: false
  }});
  splashWindow.on('closed', () => {{
    splashWindow = null;
  }});
  splashWindow.loadFile(path.join(__dirname, '{loading_page}'));
}}

function closeSplashWindow() {{
  if (splashWindow) {{
    splashWindow.close();
    splashWindow = null;
  }}
}}

function createTray() {{
  // Provide your own icon at electron/img/logo.png.
  tray = new Tray(path.join(__dirname, 'img/logo.png'));
  tray.setContextMenu(Menu.buildFromTemplate([
    {{ label: 'Quit', type: 'normal', click: () => app.quit() }}
  ]));
  tray.setToolTip(app.getName());
  tray.on('click', () => {{
    if (!mainWindow) return;
    if (mainWindow.isVisible()) {{
      mainWindow.hide();
    }} else {{
      mainWindow.show();
    }}
  }});
}}

function initAutoUpdate(win) {{
  if (isDev) return;
  autoUpdater.autoDownload = false;
  autoUpdater.on('error', (error) => console.error('update error', error));
  autoUpdater.on('update-available', () => autoUpdater.downloadUpdate());
  autoUpdater.on('download-progress', (progress) => {{
    if (win && !win.isDestroyed()) {{
      win.webContents.send('downloadEvent', progress);
    }}
  }});
  autoUpdater.on('update-downloaded', () => autoUpdater.quitAndInstall());
  autoUpdater.checkForUpdates();
}}

app.on('ready', () => {{
  createSplashWindow();
  createWindow();
  createTray();
}});

app.on('window-all-closed', () => {{
  if (process.platform !== 'darwin') {{
    app.quit();
  }}
}});

app.on('activate', () => {{
  if (mainWindow === null) {{
    createWindow();
  }}
}});

app.on('browser-window-focus', () => {{
  globalShortcut.register('F5', () => {{
    if (mainWindow) mainWindow.reload();
  }});
}});

app.on('browser-window-blur', () => {{
  globalShortcut.unregister('F5');
}});
"#,
        width = p.width,
        height = p.height,
        preload = p.preload_file,
        dev_url = p.dev_url,
        build_output = p.build_output,
        loading_page = LOADING_PAGE,
    )
}

pub fn render_preload() -> String {
    r#"// Preload script: expose the APIs the renderer needs here.
const { contextBridge } = require('electron');

contextBridge.exposeInMainWorld('electron', {
  version: process.versions.electron
});
"#
    .to_string()
}

pub fn render_loading_page() -> String {
    r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>Loading</title>
    <style>
      html, body { height: 100%; margin: 0; }
      body { display: flex; align-items: center; justify-content: center; font-family: sans-serif; }
    </style>
  </head>
  <body>
    <p>Loading...</p>
  </body>
</html>
"#
    .to_string()
}

/// Every file the given template kind produces.
pub fn plan_files(kind: TemplateKind, params: &TemplateParams) -> Vec<GeneratedFile> {
    let dir = Path::new(ELECTRON_DIR);
    let mut files = vec![
        GeneratedFile {
            relative_path: dir.join(MAIN_FILE),
            content: render_main(kind, params),
        },
        GeneratedFile {
            relative_path: dir.join(&params.preload_file),
            content: render_preload(),
        },
    ];

    if kind == TemplateKind::Tray {
        files.push(GeneratedFile {
            relative_path: dir.join(LOADING_PAGE),
            content: render_loading_page(),
        });
    }

    files
}

/// Writes `files` under `root`, creating directories and overwriting
/// existing files. Returns the absolute paths written.
pub fn write_files(root: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let full_path = root.join(&file.relative_path);
        let to_error = |source| ScaffoldError::TemplateWriteError {
            path: full_path.display().to_string(),
            source,
        };

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
        fs::write(&full_path, &file.content).map_err(to_error)?;

        tracing::debug!("wrote {}", full_path.display());
        written.push(full_path);
    }

    Ok(written)
}
