// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use std::path::PathBuf;

use clap::{Parser, ValueHint};

use twolink::{
    input::{self, Program},
    net::{DryRunSink, MqttSink},
    render::LogRender,
    Configurable, Runtime,
};

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Two-link arm controller daemon", long_about = None)]
struct Args {
    /// Arm configuration file.
    #[arg(value_hint = ValueHint::FilePath)]
    config: PathBuf,
    /// Program file with targets to replay.
    #[arg(long, value_hint = ValueHint::FilePath)]
    program: Option<PathBuf>,
    /// MQTT broker address.
    #[arg(short = 'c', long = "connect")]
    address: Option<String>,
    /// MQTT broker port.
    #[arg(short, long)]
    port: Option<u16>,
    /// MQTT broker username.
    #[arg(short = 'U', long)]
    username: Option<String>,
    /// MQTT broker password.
    #[arg(short = 'P', long)]
    password: Option<String>,
    /// Actuator topic.
    #[arg(short, long)]
    topic: Option<String>,
    /// Do not publish poses to the actuator.
    #[arg(long)]
    no_publish: bool,
    /// Quiet output (no logging).
    #[arg(long)]
    quiet: bool,
    /// Daemonize the service.
    #[arg(short = 'D', long)]
    daemon: bool,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    use log::LevelFilter;

    let args = Args::parse();

    let log_level = if args.daemon {
        LevelFilter::Info
    } else if args.quiet {
        LevelFilter::Off
    } else {
        match args.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    if args.daemon {
        twolink::logger::SystemdLogger::init(log_level)?;
    } else {
        let log_config = simplelog::ConfigBuilder::new()
            .set_target_level(LevelFilter::Off)
            .set_location_level(LevelFilter::Off)
            .add_filter_ignore_str("mio")
            .add_filter_ignore_str("rumqttc")
            .build();

        simplelog::TermLogger::init(
            log_level,
            log_config,
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )?;
    }

    let mut config = twolink::DaemonConfig {
        arm: twolink::ArmConfig::load(&args.config)?,
        program: args.program,
        global: twolink::GlobalConfig::default(),
    };

    config.global.bin_name = env!("CARGO_BIN_NAME").to_string();
    config.global.daemon = args.daemon;
    config.global.enable_publish = !args.no_publish;
    config.global.apply_broker(&config.arm.broker);

    if let Some(address) = args.address {
        config.global.mqtt_host = address;
    }
    if let Some(port) = args.port {
        config.global.mqtt_port = port;
    }
    if args.username.is_some() {
        config.global.mqtt_username = args.username;
    }
    if args.password.is_some() {
        config.global.mqtt_password = args.password;
    }
    if let Some(topic) = args.topic {
        config.arm.actuator.topic = topic;
    }

    if args.daemon {
        log::debug!("Running service as daemon");
    }

    log::trace!("{:#?}", config);

    daemonize(&config).await
}

async fn daemonize(config: &twolink::DaemonConfig) -> anyhow::Result<()> {
    let (tx, rx) = tokio::sync::mpsc::channel(twolink::consts::QUEUE_SIZE_EVENT);

    let board = config.arm.board;

    match &config.program {
        Some(path) => {
            let program = Program::load(path)?;
            log::info!("Replaying {} targets from {}", program.len(), path.display());

            tokio::spawn(program.replay(board, tx));
        }
        None => {
            log::info!("Reading targets from standard input, 'q' to quit");

            std::thread::Builder::new()
                .name("stdin".to_string())
                .spawn(move || input::read_lines(std::io::stdin().lock(), board, tx))?;
        }
    }

    let global = config.global();

    if global.enable_publish {
        log::info!(
            "Publishing on {} at {}:{}",
            config.arm.actuator.topic,
            global.mqtt_host,
            global.mqtt_port
        );

        let sink = MqttSink::new(global, &config.arm.actuator);
        Runtime::new(config.arm.arm, board, sink, LogRender)
            .run(rx)
            .await;
    } else {
        log::info!("Publish is disabled: no poses will be sent");

        Runtime::new(config.arm.arm, board, DryRunSink, LogRender)
            .run(rx)
            .await;
    }

    Ok(())
}
