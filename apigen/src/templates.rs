//! Boilerplate file contents for the built-in skeleton
//!
//! Everything here is written out verbatim; no variable substitution
//! happens anywhere in the pipeline.

/// Application entry point with a minimal HTTP server and graceful shutdown.
pub const ENTRY_POINT_GO: &str = r#"package main

import (
	"context"
	"log"
	"net/http"
	"os"
	"os/signal"
	"syscall"
	"time"
)

const defaultAddr = ":8080"

func main() {
	mux := http.NewServeMux()
	mux.HandleFunc("/", func(w http.ResponseWriter, r *http.Request) {
		w.WriteHeader(http.StatusOK)
		_, _ = w.Write([]byte("Server is Running!"))
	})

	srv := &http.Server{
		Addr: defaultAddr,
		// Good practice to set timeouts to avoid Slowloris attacks.
		WriteTimeout: time.Second * 15,
		ReadTimeout:  time.Second * 15,
		IdleTimeout:  time.Second * 60,
		Handler:      mux,
	}

	// Run the server in a goroutine so that it doesn't block.
	go func() {
		if err := srv.ListenAndServe(); err != nil && err != http.ErrServerClosed {
			log.Fatalf("listen: %s\n", err)
		}
	}()

	quit := make(chan os.Signal, 1)
	signal.Notify(quit, syscall.SIGINT, syscall.SIGTERM)

	// Block until we receive our signal.
	<-quit

	log.Println("Shutting down server...")

	ctx, cancel := context.WithTimeout(context.Background(), time.Second*15)
	defer cancel()

	if err := srv.Shutdown(ctx); err != nil {
		log.Fatal("Server forced to shutdown: ", err)
	}

	log.Println("Server exiting")
}
"#;

/// Environment-backed configuration loader.
pub const CONFIG_GO: &str = r#"package config

import "os"

type Env struct {
	ServerPort string
	DBUrl      string
	DBName     string
	JwtKey     string
	RedisUrl   string
}

func LoadEnvironmentConfig() *Env {
	return &Env{
		ServerPort: getEnv("SERVER_PORT", "8080"),
		DBUrl:      getEnv("DB_URL", ""),
		DBName:     getEnv("DB_NAME", ""),
		JwtKey:     getEnv("JWT_KEY", ""),
		RedisUrl:   getEnv("REDIS_URL", ""),
	}
}

func getEnv(key, fallback string) string {
	if value, ok := os.LookupEnv(key); ok {
		return value
	}
	return fallback
}
"#;

/// .gitignore for generated projects
pub const GITIGNORE: &str = r"# Binaries
*.exe
*.exe~
*.dll
*.so
*.dylib
/bin/

# Test binary, built with `go test -c`
*.test

# Output of the go coverage tool
*.out

# Environment
.env
.env.local

# Editor noise
.idea/
.vscode/
";
