use clap::Parser;
use csv_node::config::cli::{load_message, write_message};
use csv_node::utils::error::{ErrorSeverity, NodeError};
use csv_node::utils::{logger, validation::Validate};
use csv_node::{ChannelHost, CliConfig, FlowConfig, Message, Node, NodeRegistry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting csv-node CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&config).await {
        Ok(Some(message)) => {
            if let Some(output) = &config.output {
                if let Err(e) = write_message(output, &message).await {
                    fail(e);
                }
                tracing::info!("📁 Output saved to: {}", output);
            } else {
                println!("{}", serde_json::to_string_pretty(&message)?);
            }
            tracing::info!("✅ Conversion completed");
        }
        Ok(None) => {
            tracing::info!("Node produced no output");
        }
        Err(e) => fail(e),
    }

    Ok(())
}

async fn run(config: &CliConfig) -> csv_node::Result<Option<Message>> {
    let registry = NodeRegistry::with_builtin();

    let (node_id, node) = match (&config.flow, &config.node) {
        (Some(flow_path), Some(node_id)) => {
            let flow = FlowConfig::from_file(flow_path)?;
            flow.validate()?;
            let definition = flow.node(node_id)?;
            tracing::debug!("Using node '{}' from flow '{}'", node_id, flow.flow.name);
            (
                node_id.clone(),
                registry.create(&definition.r#type, definition.properties())?,
            )
        }
        _ => {
            let node_config = serde_json::to_value(config.node_config())?;
            ("cli".to_string(), registry.create("csv", node_config)?)
        }
    };

    let mut message = load_message(&config.input).await?;
    if let Some(topic) = &config.topic {
        message.set_topic(topic.clone());
    }

    let (host, mut receiver) = ChannelHost::new(node_id);
    node.on_input(message, &host).await?;
    drop(host);

    Ok(receiver.recv().await)
}

fn fail(e: NodeError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ csv-node failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
